//! Account address validation (EIP-55 checksum aware).

use std::fmt;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use super::error::QueryError;

/// Length of the hex body of an address, without the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// A validated account address.
///
/// The original casing is preserved, so a checksummed address is sent to the
/// backend exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address string.
    ///
    /// Accepts `0x` followed by 40 hex digits. An all-lowercase body is
    /// accepted as-is; any other casing must match the EIP-55 checksum.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        if is_address(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(QueryError::InvalidAddress)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// EIP-55 checksummed form of this address.
    pub fn to_checksum(&self) -> String {
        checksum(&self.0[2..])
    }
}

impl TryFrom<String> for Address {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `s` is a well-formed account address.
pub fn is_address(s: &str) -> bool {
    let Some(body) = s.strip_prefix("0x") else {
        return false;
    };
    if body.len() != ADDRESS_HEX_LEN || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    if s.to_ascii_lowercase() == s {
        return true;
    }
    checksum(body) == s
}

/// Compute the EIP-55 checksummed address for a 40-digit hex body.
fn checksum(body: &str) -> String {
    let lower = body.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(2 + ADDRESS_HEX_LEN);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
