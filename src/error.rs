//! Error types for relay operations
//!
//! Covers input parsing, provider failures and contract-level failures
//! when talking to the token and ballot contracts.

use serde::Serialize;
use thiserror::Error;

/// Core error type for the contract gateway
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RelayError {
    /// Address string could not be parsed as a 20-byte hex address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Amount could not be converted to an 18-decimal fixed-point value
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transaction hash could not be parsed
    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    /// JSON-RPC provider failure (network, node)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Contract call failed (revert, estimation, encoding)
    #[error("Contract error: {0}")]
    Contract(String),

    /// Pending transaction was dropped before a receipt was produced
    #[error("No receipt returned for transaction {0}")]
    MissingReceipt(String),

    /// Transaction was mined but reverted
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    kind: &'static str,
    reason: &'a str,
}

impl RelayError {
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Short machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "invalid_address",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidHash(_) => "invalid_hash",
            Self::Provider(_) => "provider",
            Self::Contract(_) => "contract",
            Self::MissingReceipt(_) => "missing_receipt",
            Self::Reverted(_) => "reverted",
            Self::Config(_) => "config",
        }
    }

    /// True when the failure comes from caller input rather than the chain
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress(_) | Self::InvalidAmount(_) | Self::InvalidHash(_)
        )
    }

    /// Serialized failure detail carried in `ErrorMessage::detailed_message`
    pub fn detail(&self) -> String {
        let reason = self.to_string();
        let detail = ErrorDetail {
            kind: self.kind(),
            reason: &reason,
        };
        serde_json::to_string(&detail).unwrap_or(reason)
    }
}
