/// Relay configuration from environment variables
///
/// Controls the JSON-RPC endpoint, the signing key, the contract addresses
/// and the HTTP bind address. Defaults target the Goerli deployment.

use std::env;
use thiserror::Error;
use tokenized_ballot::units::parse_address;
use tokenized_ballot::ContractAddresses;

pub const DEFAULT_MY_TOKEN_ADDRESS: &str = "0x9A750A01629649975DC1F4e608aB203016F55180";
pub const DEFAULT_TOKENIZED_BALLOT_ADDRESS: &str = "0xD7B7419e9FaC3D687a206e0656Ec7938049aA9e2";
pub const DEFAULT_EXPLORER_URL: &str = "https://goerli.etherscan.io";
pub const DEFAULT_CHAIN_ID: u64 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// JSON-RPC endpoint of the network
    pub rpc_url: String,
    /// Hex private key of the relay signer
    pub signer_private_key: String,
    pub chain_id: u64,
    pub contracts: ContractAddresses,
    /// Block explorer base URL used for transaction links
    pub explorer_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// CORS allow list; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    /// Load configuration from the process environment (and `.env` if present)
    ///
    /// Environment variables:
    /// - `RPC_URL`: JSON-RPC endpoint, or `ALCHEMY_API_KEY` to derive a Goerli one
    /// - `SIGNER_PRIVATE_KEY` (or `METAMASK_WALLET_PRIVATE_KEY`): relay signer
    /// - `CHAIN_ID`: defaults to 5
    /// - `MY_TOKEN_ADDRESS`, `TOKENIZED_BALLOT_ADDRESS`: contract addresses
    /// - `EXPLORER_URL`: defaults to https://goerli.etherscan.io
    /// - `SERVER_HOST`, `SERVER_PORT`: defaults to 0.0.0.0:3000
    /// - `ALLOWED_ORIGINS`: comma separated CORS origins
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rpc_url = match var("RPC_URL") {
            Some(url) => url,
            None => {
                let key = var("ALCHEMY_API_KEY").ok_or(ConfigError::Missing("RPC_URL"))?;
                format!("https://eth-goerli.g.alchemy.com/v2/{}", key)
            }
        };

        let signer_private_key = var("SIGNER_PRIVATE_KEY")
            .or_else(|| var("METAMASK_WALLET_PRIVATE_KEY"))
            .ok_or(ConfigError::Missing("SIGNER_PRIVATE_KEY"))?;

        let chain_id = match var("CHAIN_ID") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "CHAIN_ID",
                value,
            })?,
            None => DEFAULT_CHAIN_ID,
        };

        let address = |name: &'static str, default: &str| {
            let value = var(name).unwrap_or_else(|| default.to_string());
            parse_address(&value).map_err(|_| ConfigError::Invalid { name, value })
        };

        let contracts = ContractAddresses {
            my_token: address("MY_TOKEN_ADDRESS", DEFAULT_MY_TOKEN_ADDRESS)?,
            tokenized_ballot: address("TOKENIZED_BALLOT_ADDRESS", DEFAULT_TOKENIZED_BALLOT_ADDRESS)?,
        };

        let explorer_url = var("EXPLORER_URL").unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string());

        let server_host = var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = match var("SERVER_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            None => 3000,
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            rpc_url,
            signer_private_key,
            chain_id,
            contracts,
            explorer_url,
            server_host,
            server_port,
            allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
