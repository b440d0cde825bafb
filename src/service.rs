//! Relay service: maps relay operations onto `BallotChain` calls and shapes
//! results into response envelopes.
//!
//! Reads return `Result` and leave error reporting to the caller. Writes and
//! the winning-proposal read never fail: every error is folded into
//! `TxOutcome::Error`.

use ethers::types::{Address, Transaction, H256, U256};
use ethers::utils::to_checksum;
use std::sync::Arc;

use crate::chain::BallotChain;
use crate::error::RelayError;
use crate::types::{
    ErrorMessage, ProposalSummary, TransactionResponse, TxOutcome, TxStatus, NO_EXPLORER_LINK,
    NO_HASH,
};
use crate::units::{
    decode_bytes32, hash_hex, parse_address, parse_proposal_id, parse_tx_hash, to_base_units,
    to_decimal, to_fixed_point,
};

/// Addresses of the two pre-deployed contracts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractAddresses {
    pub my_token: Address,
    pub tokenized_ballot: Address,
}

pub struct RelayService {
    chain: Arc<dyn BallotChain>,
    addresses: ContractAddresses,
    explorer_url: String,
}

impl RelayService {
    pub fn new(
        chain: Arc<dyn BallotChain>,
        addresses: ContractAddresses,
        explorer_url: impl Into<String>,
    ) -> Self {
        let explorer_url = explorer_url.into().trim_end_matches('/').to_string();
        Self {
            chain,
            addresses,
            explorer_url,
        }
    }

    pub fn my_token_address(&self) -> String {
        to_checksum(&self.addresses.my_token, None)
    }

    pub fn tokenized_ballot_address(&self) -> String {
        to_checksum(&self.addresses.tokenized_ballot, None)
    }

    pub fn etherscan_link(&self, hash: &H256) -> String {
        format!("{}/tx/{}", self.explorer_url, hash_hex(hash))
    }

    pub async fn total_supply(&self) -> Result<f64, RelayError> {
        let supply = self.chain.total_supply().await?;
        Ok(to_decimal(supply))
    }

    pub async fn allowance(&self, from: &str, to: &str) -> Result<f64, RelayError> {
        let owner = parse_address(from)?;
        let spender = parse_address(to)?;
        let allowance = self.chain.allowance(owner, spender).await?;
        Ok(to_decimal(allowance))
    }

    /// `Success` once the transaction has been mined, `Fail` otherwise
    /// (pending or unknown)
    pub async fn transaction_status(&self, hash: &str) -> Result<TxStatus, RelayError> {
        let hash = parse_tx_hash(hash)?;
        let tx = self.chain.transaction(hash).await?;

        let mined = tx.map(|tx| tx.block_number.is_some()).unwrap_or(false);
        Ok(if mined { TxStatus::Success } else { TxStatus::Fail })
    }

    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<Transaction>, RelayError> {
        let hash = parse_tx_hash(hash)?;
        self.chain.transaction(hash).await
    }

    /// Mint `amount` whole tokens to `address`
    pub async fn request_tokens(&self, address: &str, amount: f64) -> TxOutcome {
        let result = async {
            let to = parse_address(address)?;
            let amount = to_fixed_point(amount)?;
            self.chain.mint(to, amount).await
        }
        .await;

        self.write_outcome(
            result,
            format!("Successfully minted {} MTK to {}.", amount, address),
            format!("Error while minting tokens to {}", address),
        )
    }

    pub async fn delegate(&self, delegatee: &str) -> TxOutcome {
        let result = async {
            let delegatee = parse_address(delegatee)?;
            self.chain.delegate(delegatee).await
        }
        .await;

        self.write_outcome(
            result,
            format!(
                "Successfully delegated votes to account address {}.",
                delegatee
            ),
            format!("Error delegating to {}", delegatee),
        )
    }

    /// Spend `amount` of voting power on `proposal_id`. The amount is passed
    /// to the ballot as-is, in base units, unlike mint amounts.
    pub async fn vote(&self, proposal_id: &str, amount: f64) -> TxOutcome {
        let result = async {
            let proposal = parse_proposal_id(proposal_id)?;
            let amount = to_base_units(amount)?;
            self.chain.vote(proposal, amount).await
        }
        .await;

        self.write_outcome(
            result,
            format!("Successfully voted for proposal with ID {}.", proposal_id),
            format!("Error voting for proposal Id: {}", proposal_id),
        )
    }

    pub async fn winning_proposal_summary(&self) -> Result<ProposalSummary, RelayError> {
        let index = self.chain.winning_proposal().await?;
        if index > U256::from(u64::MAX) {
            return Err(RelayError::contract(format!(
                "Winning proposal index out of range: {}",
                index
            )));
        }

        let (name, vote_count) = self.chain.proposal(index).await?;

        Ok(ProposalSummary {
            index: index.as_u64(),
            name: decode_bytes32(&name)?,
            vote_count: to_decimal(vote_count),
        })
    }

    /// Winning proposal packaged in the write envelope with sentinel hash/link
    pub async fn winning_proposal(&self) -> TxOutcome {
        match self.winning_proposal_summary().await {
            Ok(summary) => TxOutcome::Success(TransactionResponse {
                message: format!(
                    "Winning proposal ID: {}. Proposal name: {}. Proposal vote count: {}.",
                    summary.index, summary.name, summary.vote_count
                ),
                transaction_hash: NO_HASH.to_string(),
                etherscan_link: NO_EXPLORER_LINK.to_string(),
            }),
            Err(err) => {
                log::warn!("Winning proposal lookup failed: {}", err);
                TxOutcome::Error(ErrorMessage {
                    message: "Error while getting winning proposal.".to_string(),
                    detailed_message: err.detail(),
                })
            }
        }
    }

    fn write_outcome(
        &self,
        result: Result<H256, RelayError>,
        success: String,
        failure: String,
    ) -> TxOutcome {
        match result {
            Ok(hash) => TxOutcome::Success(TransactionResponse {
                message: success,
                transaction_hash: hash_hex(&hash),
                etherscan_link: self.etherscan_link(&hash),
            }),
            Err(err) => {
                log::warn!("{}: {}", failure, err);
                TxOutcome::Error(ErrorMessage {
                    message: failure,
                    detailed_message: err.detail(),
                })
            }
        }
    }
}
