//! Integration tests for token-console.
//!
//! Each test drives a query state machine against a mock token backend:
//! - `begin` validates and resolves the target address
//! - the backend client performs the request
//! - `finish` applies the response

pub mod e2e_balance_flow;
pub mod e2e_minter_flow;
pub mod e2e_token_info_flow;

use mockito::{Mock, Server, ServerGuard};
use token_console::{
    domain::address::Address,
    infra::{api::TokenApi, chain::ChainReader},
};

/// A checksummed account used throughout the tests.
pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
/// A lowercase (unchecksummed) account.
pub const BOB: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";

/// Strings that must never reach the network.
pub const MALFORMED: [&str; 8] = [
    "",
    "   ",
    " 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed ",
    "0x",
    "hello",
    "0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea",
    "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
];

pub fn localhost_binding_permitted() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn address(s: &str) -> Address {
    Address::parse(s).expect("valid test address")
}

/// Mock backend plus clients pointed at it.
pub struct TestBackend {
    pub server: ServerGuard,
    pub api: TokenApi,
    pub chain: ChainReader,
}

impl TestBackend {
    pub async fn start() -> Self {
        let server = Server::new_async().await;
        let api = TokenApi::new(&server.url());
        let chain = ChainReader::new(&server.url());
        Self { server, api, chain }
    }

    /// Mock a `{ "result": ... }` response.
    pub async fn respond(&mut self, method: &str, path: &str, status: usize, result: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_query(mockito::Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"result":{}}}"#, result))
            .create_async()
            .await
    }

    /// Mock the `decimals()` JSON-RPC call.
    pub async fn respond_decimals(&mut self, decimals: u8) -> Mock {
        self.server
            .mock("POST", "/")
            .match_body(mockito::Matcher::Regex(r#""method"\s*:\s*"eth_call""#.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"jsonrpc":"2.0","id":1,"result":"0x{:064x}"}}"#,
                decimals
            ))
            .create_async()
            .await
    }
}
