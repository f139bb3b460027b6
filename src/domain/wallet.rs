//! Connected-wallet session.
//!
//! The wallet is owned by the app and handed to panels as a plain address, so
//! nothing reads wallet state from a global.

use super::address::Address;

/// Connection state of the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletStatus {
    Connecting,
    Disconnected,
    /// Connected to the chain, but no account is configured.
    NoAddress,
    Connected(Address),
}

impl WalletStatus {
    /// Short line describing the status, shown in the header.
    pub fn describe(&self) -> String {
        match self {
            WalletStatus::Connecting => "Connecting wallet...".to_string(),
            WalletStatus::Disconnected => "Please connect your wallet to continue".to_string(),
            WalletStatus::NoAddress => "Wallet not connected".to_string(),
            WalletStatus::Connected(addr) => format!("Connected Address: {}", addr),
        }
    }
}

/// A read-only wallet session bound to a configured account.
#[derive(Debug, Clone)]
pub struct WalletSession {
    account: Option<Address>,
    status: WalletStatus,
    chain_id: Option<u64>,
}

impl WalletSession {
    pub fn new(account: Option<Address>) -> Self {
        Self {
            account,
            status: WalletStatus::Disconnected,
            chain_id: None,
        }
    }

    pub fn status(&self) -> &WalletStatus {
        &self.status
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Address of the connected account, if connected.
    pub fn address(&self) -> Option<&Address> {
        match &self.status {
            WalletStatus::Connected(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn is_connecting(&self) -> bool {
        self.status == WalletStatus::Connecting
    }

    pub fn begin_connect(&mut self) {
        self.status = WalletStatus::Connecting;
    }

    /// Complete a connection attempt with the chain id reported by the node.
    ///
    /// Returns `false` and leaves the session untouched when no attempt is in
    /// flight, e.g. the user disconnected before the node answered.
    pub fn finish_connect(&mut self, chain_id: Result<u64, String>) -> bool {
        if !self.is_connecting() {
            return false;
        }
        match chain_id {
            Ok(id) => {
                self.chain_id = Some(id);
                self.status = match &self.account {
                    Some(addr) => WalletStatus::Connected(addr.clone()),
                    None => WalletStatus::NoAddress,
                };
            }
            Err(_) => {
                self.chain_id = None;
                self.status = WalletStatus::Disconnected;
            }
        }
        true
    }

    pub fn disconnect(&mut self) {
        self.chain_id = None;
        self.status = WalletStatus::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::parse("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap()
    }

    #[test]
    fn test_connect_flow() {
        let mut wallet = WalletSession::new(Some(addr()));
        assert_eq!(wallet.status(), &WalletStatus::Disconnected);
        assert!(wallet.address().is_none());

        wallet.begin_connect();
        assert!(wallet.is_connecting());
        assert!(wallet.address().is_none());

        assert!(wallet.finish_connect(Ok(31337)));
        assert_eq!(wallet.address(), Some(&addr()));
        assert_eq!(wallet.chain_id(), Some(31337));

        wallet.disconnect();
        assert!(wallet.address().is_none());
        assert_eq!(wallet.chain_id(), None);
    }

    #[test]
    fn test_connect_without_account() {
        let mut wallet = WalletSession::new(None);
        wallet.begin_connect();
        wallet.finish_connect(Ok(1));
        assert_eq!(wallet.status(), &WalletStatus::NoAddress);
        assert_eq!(wallet.status().describe(), "Wallet not connected");
    }

    #[test]
    fn test_failed_connect() {
        let mut wallet = WalletSession::new(Some(addr()));
        wallet.begin_connect();
        wallet.finish_connect(Err("connection refused".to_string()));
        assert_eq!(wallet.status(), &WalletStatus::Disconnected);
        assert!(wallet.address().is_none());
    }

    #[test]
    fn test_late_connect_after_disconnect_is_ignored() {
        let mut wallet = WalletSession::new(Some(addr()));
        wallet.begin_connect();
        wallet.disconnect();

        assert!(!wallet.finish_connect(Ok(31337)));
        assert_eq!(wallet.status(), &WalletStatus::Disconnected);
        assert!(wallet.address().is_none());
        assert_eq!(wallet.chain_id(), None);
    }
}
