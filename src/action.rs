use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::{address::Address, error::QueryError, query::TokenInfo};

/// Actions that can be triggered by user input, background requests, or
/// internal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Resize(u16, u16),
    Suspend,
    Quit,
    Error(String),
    Help,

    // Tab switching
    TabMinter,
    TabBalance,
    TabTokenInfo,

    // Wallet
    ConnectWallet,
    DisconnectWallet,
    WalletConnected(Result<u64, String>),

    // Requests, sent by panels once the target address is validated
    FetchBalance(Address),
    CheckMinterRole(Address),
    MintTokens(Address),
    RefreshTokenInfo,

    // Responses from spawned requests
    DecimalsLoaded(Option<u8>),
    BalanceFetched(Result<String, QueryError>),
    MinterRoleChecked(Address, Result<bool, QueryError>),
    MintFinished(Result<bool, QueryError>),
    TokenInfoFetched(Result<TokenInfo, QueryError>),
}
