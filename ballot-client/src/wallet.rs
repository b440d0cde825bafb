//! Wallet session: the user's own account, read straight from the chain
//!
//! Stands in for a browser wallet extension. The session holds a provider
//! and a local signer, and reads balances without going through the relay.

use ethers::prelude::*;
use std::sync::Arc;

use tokenized_ballot::units::to_decimal;
use tokenized_ballot::{MyToken, SignerClient};

use crate::error::ClientError;

pub struct WalletSession {
    client: Arc<SignerClient>,
}

/// Snapshot of a connected account
#[derive(Debug, Clone, PartialEq)]
pub struct WalletInfo {
    pub address: Address,
    pub eth_balance: f64,
    pub token_balance: f64,
    pub voting_power: f64,
}

impl WalletSession {
    pub fn connect(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, ClientError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ClientError::Wallet(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

        let wallet = private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| ClientError::Wallet(format!("Invalid private key: {}", e)))?
            .with_chain_id(chain_id);

        log::info!("Wallet connected: {:?}", wallet.address());

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
        })
    }

    pub fn address(&self) -> Address {
        self.client.address()
    }

    /// Native balance in ether
    pub async fn eth_balance(&self) -> Result<f64, ClientError> {
        let balance = self
            .client
            .get_balance(self.address(), None)
            .await
            .map_err(|e| ClientError::Chain(e.to_string()))?;
        Ok(to_decimal(balance))
    }

    pub async fn token_balance(&self, token: Address) -> Result<f64, ClientError> {
        let contract = MyToken::new(token, self.client.clone());
        let balance = contract
            .balance_of(self.address())
            .call()
            .await
            .map_err(|e| ClientError::Chain(e.to_string()))?;
        Ok(to_decimal(balance))
    }

    /// Votes currently delegated to this account
    pub async fn voting_power(&self, token: Address) -> Result<f64, ClientError> {
        let contract = MyToken::new(token, self.client.clone());
        let votes = contract
            .get_votes(self.address())
            .call()
            .await
            .map_err(|e| ClientError::Chain(e.to_string()))?;
        Ok(to_decimal(votes))
    }

    pub async fn token_total_supply(&self, token: Address) -> Result<f64, ClientError> {
        let contract = MyToken::new(token, self.client.clone());
        let supply = contract
            .total_supply()
            .call()
            .await
            .map_err(|e| ClientError::Chain(e.to_string()))?;
        Ok(to_decimal(supply))
    }

    pub async fn info(&self, token: Address) -> Result<WalletInfo, ClientError> {
        Ok(WalletInfo {
            address: self.address(),
            eth_balance: self.eth_balance().await?,
            token_balance: self.token_balance(token).await?,
            voting_power: self.voting_power(token).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development key (first account of a local dev node)
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_connect_derives_address() {
        let session = WalletSession::connect("http://localhost:8545", DEV_KEY, 31337).unwrap();
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(session.address(), expected);
    }

    #[test]
    fn test_connect_rejects_bad_key() {
        let result = WalletSession::connect("http://localhost:8545", "not-a-key", 5);
        assert!(matches!(result, Err(ClientError::Wallet(_))));
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let result = WalletSession::connect("not a url", DEV_KEY, 5);
        assert!(matches!(result, Err(ClientError::Wallet(_))));
    }
}
