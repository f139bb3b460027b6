//! Token Console - A TUI front-end for an ERC-20 token backend.
//!
//! This library provides:
//! - Account address validation with EIP-55 checksums
//! - Fixed-point formatting of raw token amounts
//! - Query state machines for balance, minter role, mint and token info
//! - HTTP client for the token backend and a JSON-RPC reader for `decimals()`

pub mod config;
pub mod domain;
pub mod infra;
