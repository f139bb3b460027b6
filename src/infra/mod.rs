pub mod api;
pub mod chain;
