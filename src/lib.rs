//! Tokenized Ballot: contract gateway for a mintable voting token and a
//! tokenized ballot
//!
//! This crate holds everything between the HTTP layer and the network:
//! contract bindings, the `BallotChain` capability with its `ethers`
//! implementation, 18-decimal fixed-point conversion, and the
//! `RelayService` that turns contract results into response envelopes.
//!
//! # Architecture
//!
//! - **BallotChain**: raw reads and confirmed writes against the two contracts
//! - **RelayService**: input parsing, unit conversion, envelope shaping
//! - **Types**: request/response DTOs shared with `ballot-api` and `ballot-client`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokenized_ballot::{ContractAddresses, EthersChain, RelayService};
//!
//! let chain = EthersChain::connect(&rpc_url, &private_key, 5, token, ballot)?;
//! let service = RelayService::new(Arc::new(chain), addresses, "https://goerli.etherscan.io");
//!
//! let outcome = service.request_tokens("0xfcC5fB101131630Bd2154A7f0BcDC433159325c6", 5000.0).await;
//! ```

// Public modules
pub mod chain;
pub mod contracts;
pub mod error;
pub mod service;
pub mod types;
pub mod units;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports for convenience
pub use chain::{BallotChain, EthersChain, SignerClient};
pub use contracts::{MyToken, TokenizedBallot};
pub use error::RelayError;
pub use service::{ContractAddresses, RelayService};
pub use types::{
    AddressResponse, AllowanceQuery, DelegateRequest, ErrorMessage, ProposalSummary,
    RequestTokenRequest, TransactionResponse, TxOutcome, TxStatus, VoteRequest,
};

// Re-export commonly used chain types
pub use ethers::types::{Address, Transaction, H256, U256};

// Common result type
pub type Result<T> = std::result::Result<T, RelayError>;
