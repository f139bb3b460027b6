//! HTTP client for the token backend.
//!
//! Every endpoint answers `{ "result": <value> }`. Any non-2xx status is a
//! failure; error bodies are not parsed.

use futures::future;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::domain::{address::Address, error::QueryError, query::TokenInfo};

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

/// A raw amount may arrive as a decimal string or a bare JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl RawAmount {
    fn into_string(self) -> String {
        match self {
            RawAmount::Text(s) => s,
            RawAmount::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MintRequest<'a> {
    address: &'a str,
}

/// Token backend client.
#[derive(Debug, Clone)]
pub struct TokenApi {
    client: Client,
    base_url: String,
}

impl TokenApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw (unscaled) balance of `address`, as a decimal string.
    pub async fn token_balance(&self, address: &Address) -> Result<String, QueryError> {
        let url = self.url(&format!("/token-balance/{}", address));
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let raw: RawAmount = decode(response).await?;
        Ok(raw.into_string())
    }

    pub async fn token_name(&self) -> Result<String, QueryError> {
        let response = self.client.get(self.url("/token-name")).send().await?;
        decode(response).await
    }

    pub async fn total_supply(&self) -> Result<String, QueryError> {
        let response = self.client.get(self.url("/total-supply")).send().await?;
        let raw: RawAmount = decode(response).await?;
        Ok(raw.into_string())
    }

    /// Fetch name and total supply concurrently.
    ///
    /// Both requests must succeed; any failure collapses into
    /// [`QueryError::TokenInfoUnavailable`].
    pub async fn token_info(&self) -> Result<TokenInfo, QueryError> {
        let (name, total_supply) = future::join(self.token_name(), self.total_supply()).await;
        match (name, total_supply) {
            (Ok(name), Ok(total_supply)) => Ok(TokenInfo { name, total_supply }),
            (name, total_supply) => {
                debug!(
                    "Token info failed: name={:?}, total_supply={:?}",
                    name.err(),
                    total_supply.err()
                );
                Err(QueryError::TokenInfoUnavailable)
            }
        }
    }

    pub async fn check_minter_role(&self, address: &Address) -> Result<bool, QueryError> {
        let response = self
            .client
            .get(self.url("/check-minter-role"))
            .query(&[("address", address.as_str())])
            .send()
            .await?;
        decode(response).await
    }

    /// Ask the backend to mint to `address`.
    ///
    /// The returned flag is the backend-reported outcome, not a receipt.
    pub async fn mint_tokens(&self, address: &Address) -> Result<bool, QueryError> {
        debug!("POST /mint-tokens for {}", address);
        let response = self
            .client
            .post(self.url("/mint-tokens"))
            .json(&MintRequest {
                address: address.as_str(),
            })
            .send()
            .await?;
        decode(response).await
    }
}

/// Check the status and unwrap the `result` envelope.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, QueryError> {
    let status = response.status();
    if !status.is_success() {
        return Err(QueryError::HttpStatus(status.as_u16()));
    }
    let body = response.text().await?;
    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    Ok(envelope.result)
}
