use clap::Parser;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "token-console")]
#[command(version)]
#[command(about = "A TUI console for checking balances, minter roles and minting tokens")]
pub struct Args {
    /// Tick rate in ticks per second
    #[arg(short, long, default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 30.0)]
    pub frame_rate: f64,

    /// Token backend base URL (default: http://localhost:3001)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Ethereum JSON-RPC URL used to read the token's decimals
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Token contract address
    #[arg(long)]
    pub token: Option<String>,

    /// Wallet account to connect as
    #[arg(short, long)]
    pub wallet: Option<String>,

    /// Data directory path (log file location)
    #[arg(long)]
    pub data_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn overrides(&self) -> Overrides<'_> {
        Overrides {
            api_url: self.api_url.as_deref(),
            rpc_url: self.rpc_url.as_deref(),
            token_address: self.token.as_deref(),
            wallet: self.wallet.as_deref(),
        }
    }
}
