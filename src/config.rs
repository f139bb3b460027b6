use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::address::Address;
use crate::infra::{api::DEFAULT_API_URL, chain::DEFAULT_RPC_URL};

/// Token contract whose `decimals()` is read for balance formatting.
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x37dBD10E7994AAcF6132cac7d33bcA899bd2C660";

const CONFIG_FILE: &str = "config.json";

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("TOKEN_CONSOLE_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "token-console", "token-console") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Get the config directory for the application.
pub fn get_config_dir() -> PathBuf {
    if let Ok(s) = std::env::var("TOKEN_CONSOLE_CONFIG") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "token-console", "token-console") {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the token backend.
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub token_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Account the wallet session connects as.
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub chain: ChainConfig,
    pub wallet: WalletConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
            },
            chain: ChainConfig {
                rpc_url: DEFAULT_RPC_URL.to_string(),
                token_address: DEFAULT_TOKEN_ADDRESS.to_string(),
            },
            wallet: WalletConfig::default(),
        }
    }
}

/// Values given on the command line; each one overrides the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides<'a> {
    pub api_url: Option<&'a str>,
    pub rpc_url: Option<&'a str>,
    pub token_address: Option<&'a str>,
    pub wallet: Option<&'a str>,
}

impl Config {
    /// Load `config.json` from the config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, overrides: &Overrides<'_>) -> Self {
        if let Some(url) = overrides.api_url {
            self.api.base_url = url.to_string();
        }
        if let Some(url) = overrides.rpc_url {
            self.chain.rpc_url = url.to_string();
        }
        if let Some(token) = overrides.token_address {
            self.chain.token_address = token.to_string();
        }
        if let Some(wallet) = overrides.wallet {
            self.wallet.address = Some(wallet.to_string());
        }
        self
    }

    /// Validated token contract address.
    pub fn token_address(&self) -> Result<Address> {
        Address::parse(&self.chain.token_address)
            .wrap_err_with(|| format!("Invalid token address {}", self.chain.token_address))
    }

    /// Validated wallet account, if one is configured.
    pub fn wallet_address(&self) -> Result<Option<Address>> {
        self.wallet
            .address
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                Address::parse(s.trim()).wrap_err_with(|| format!("Invalid wallet address {}", s))
            })
            .transpose()
    }
}
