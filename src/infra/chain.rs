//! Read-only Ethereum JSON-RPC access.
//!
//! Only two calls are needed: `eth_chainId` to check the node is reachable when
//! the wallet connects, and an `eth_call` of `decimals()` on the token contract.

use color_eyre::eyre::{Result, eyre};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::domain::address::Address;

/// Default JSON-RPC endpoint (local development node).
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Signature of the only contract function read by the console.
pub const DECIMALS_SIGNATURE: &str = "decimals()";

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

/// 4-byte function selector: the first bytes of keccak-256 of the signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Decode an ABI-encoded `uint8` return value.
pub fn decode_uint8(data: &str) -> Result<u8> {
    let bytes = hex::decode(data.trim_start_matches("0x"))
        .map_err(|e| eyre!("Invalid hex in call result: {}", e))?;
    if bytes.len() != 32 {
        return Err(eyre!("Expected a 32-byte word, got {} bytes", bytes.len()));
    }
    if bytes[..31].iter().any(|b| *b != 0) {
        return Err(eyre!("Value does not fit in uint8: 0x{}", hex::encode(&bytes)));
    }
    Ok(bytes[31])
}

fn parse_quantity(value: &str) -> Result<u64> {
    u64::from_str_radix(value.trim_start_matches("0x"), 16)
        .map_err(|e| eyre!("Invalid quantity {}: {}", value, e))
}

/// Minimal JSON-RPC client for read calls.
#[derive(Debug, Clone)]
pub struct ChainReader {
    client: Client,
    rpc_url: String,
}

impl ChainReader {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: Client::new(),
            rpc_url: rpc_url.to_string(),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!("RPC {} -> {}", method, self.rpc_url);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| eyre!("RPC request {} failed: {}", method, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(eyre!("RPC request {} failed with status {}", method, status));
        }

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| eyre!("Invalid RPC response for {}: {}", method, e))?;

        if let Some(err) = response.error {
            return Err(eyre!("RPC error {} in {}: {}", err.code, method, err.message));
        }
        response
            .result
            .ok_or_else(|| eyre!("RPC response for {} has no result", method))
    }

    /// Chain id reported by the node.
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.request("eth_chainId", json!([])).await?;
        let quantity = result
            .as_str()
            .ok_or_else(|| eyre!("eth_chainId result is not a string"))?;
        parse_quantity(quantity)
    }

    /// Read `decimals() -> uint8` from `token`.
    pub async fn decimals(&self, token: &Address) -> Result<u8> {
        let data = format!("0x{}", hex::encode(function_selector(DECIMALS_SIGNATURE)));
        let result = self
            .request(
                "eth_call",
                json!([{ "to": token.as_str(), "data": data }, "latest"]),
            )
            .await?;
        let word = result
            .as_str()
            .ok_or_else(|| eyre!("eth_call result is not a string"))?;
        decode_uint8(word)
    }
}
