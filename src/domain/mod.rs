pub mod address;
pub mod amount;
pub mod error;
pub mod query;
pub mod wallet;
