//! Client side of the ballot relay: a typed HTTP client for the relay API
//! and a wallet session for reads the user makes with their own account.

pub mod api;
pub mod error;
pub mod wallet;

pub use api::RelayClient;
pub use error::ClientError;
pub use wallet::{WalletInfo, WalletSession};

use tokenized_ballot::TxOutcome;

/// Render a write outcome the way the UI shows it: a success block with the
/// hash and explorer link, or an error block with the serialized detail.
pub fn render_outcome(outcome: &TxOutcome) -> String {
    match outcome {
        TxOutcome::Success(resp) => format!(
            "{}\n  transaction: {}\n  explorer:    {}",
            resp.message, resp.transaction_hash, resp.etherscan_link
        ),
        TxOutcome::Error(err) => format!("{}\n  detail: {}", err.message, err.detailed_message),
    }
}
