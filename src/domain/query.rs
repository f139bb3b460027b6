//! Per-panel query state machines.
//!
//! Each query runs `Idle -> Loading -> (Success | Error)`. A query is started
//! with `begin`, which resolves and validates the target address and returns
//! it for the request; the response is applied with `finish`. Nothing guards
//! against overlapping requests: the last `finish` wins.

use serde::{Deserialize, Serialize};

use super::{address::Address, amount::display_amount, error::QueryError};

/// State of one asynchronous query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Idle
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            QueryState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    fn fail(&mut self, err: &QueryError) {
        *self = QueryState::Error(err.to_string());
    }
}

/// Pick the first non-empty candidate. Whitespace counts as content and is
/// left for the validator to reject.
fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

// ==================== Balance ====================

/// Balance lookup for an address.
#[derive(Debug, Clone, Default)]
pub struct BalanceQuery {
    /// Address text field.
    pub input: String,
    pub state: QueryState<String>,
    /// Address to copy into the empty field once the request succeeds.
    fill_on_success: Option<Address>,
}

impl BalanceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a balance lookup for `explicit`, or the field value when absent.
    pub fn begin(&mut self, explicit: Option<&str>) -> Result<Address, QueryError> {
        self.state = QueryState::Loading;
        self.fill_on_success = None;

        let explicit = first_non_empty([explicit]);
        let target = explicit.unwrap_or(self.input.as_str());

        match Address::parse(target) {
            Ok(addr) => {
                if self.input.is_empty() && explicit.is_some() {
                    self.fill_on_success = Some(addr.clone());
                }
                Ok(addr)
            }
            Err(e) => {
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    /// Apply the balance response, formatting with `decimals` when known.
    pub fn finish(&mut self, outcome: Result<String, QueryError>, decimals: Option<u8>) {
        match outcome.and_then(|raw| display_amount(&raw, decimals)) {
            Ok(balance) => {
                self.state = QueryState::Success(balance);
                if let Some(addr) = self.fill_on_success.take()
                    && self.input.is_empty()
                {
                    self.input = addr.to_string();
                }
            }
            Err(e) => self.state.fail(&e),
        }
    }
}

// ==================== Minter role ====================

/// Result of a minter-role check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinterRole {
    pub address: Address,
    pub is_minter: bool,
}

impl MinterRole {
    pub fn describe(&self) -> String {
        if self.is_minter {
            format!("{} has minter role", self.address)
        } else {
            format!("{} does not have minter role", self.address)
        }
    }
}

/// Minter-role check for an address.
#[derive(Debug, Clone, Default)]
pub struct MinterRoleQuery {
    pub input: String,
    pub state: QueryState<MinterRole>,
    fill_on_success: bool,
}

impl MinterRoleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a role check.
    ///
    /// The target is `explicit`, else the field value, else the connected
    /// wallet's address.
    pub fn begin(
        &mut self,
        explicit: Option<&str>,
        wallet: Option<&Address>,
    ) -> Result<Address, QueryError> {
        self.state = QueryState::Loading;
        self.fill_on_success = false;

        let explicit = first_non_empty([explicit]);
        let field_empty = self.input.is_empty();
        let target = first_non_empty([explicit, Some(self.input.as_str()), wallet.map(Address::as_str)]);

        match target.ok_or(QueryError::InvalidAddress).and_then(Address::parse) {
            Ok(addr) => {
                self.fill_on_success = field_empty && explicit.is_none();
                Ok(addr)
            }
            Err(e) => {
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    /// Apply the role-check response for `address`.
    pub fn finish(&mut self, address: Address, outcome: Result<bool, QueryError>) {
        match outcome {
            Ok(is_minter) => {
                if self.fill_on_success && self.input.is_empty() {
                    self.input = address.to_string();
                }
                self.state = QueryState::Success(MinterRole { address, is_minter });
            }
            Err(e) => self.state.fail(&e),
        }
    }
}

// ==================== Mint ====================

/// Mint request for an address.
#[derive(Debug, Clone, Default)]
pub struct MintCommand {
    pub input: String,
    /// Backend-reported outcome of the mint.
    pub state: QueryState<bool>,
    fill_on_success: Option<Address>,
}

impl MintCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a mint for the field value, or the connected wallet when empty.
    pub fn begin(&mut self, wallet: Option<&Address>) -> Result<Address, QueryError> {
        self.state = QueryState::Loading;
        self.fill_on_success = None;

        let target = first_non_empty([Some(self.input.as_str()), wallet.map(Address::as_str)]);

        match target.ok_or(QueryError::InvalidAddress).and_then(Address::parse) {
            Ok(addr) => {
                if self.input.is_empty() {
                    self.fill_on_success = Some(addr.clone());
                }
                Ok(addr)
            }
            Err(e) => {
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    pub fn finish(&mut self, outcome: Result<bool, QueryError>) {
        match outcome {
            Ok(minted) => {
                self.state = QueryState::Success(minted);
                if let Some(addr) = self.fill_on_success.take()
                    && self.input.is_empty()
                {
                    self.input = addr.to_string();
                }
            }
            Err(e) => self.state.fail(&e),
        }
    }

    pub fn describe(minted: bool) -> &'static str {
        if minted {
            "Token minting successful"
        } else {
            "Token minting failed"
        }
    }
}

// ==================== Token info ====================

/// Token metadata from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub total_supply: String,
}

/// Name and total supply, refreshed on demand.
#[derive(Debug, Clone, Default)]
pub struct TokenInfoQuery {
    pub state: QueryState<TokenInfo>,
}

impl TokenInfoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.state = QueryState::Loading;
    }

    pub fn finish(&mut self, outcome: Result<TokenInfo, QueryError>) {
        self.state = match outcome {
            Ok(info) => QueryState::Success(info),
            Err(e) => QueryState::Error(e.to_string()),
        };
    }
}
