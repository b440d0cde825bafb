//! Chain access for the relay
//!
//! `BallotChain` is the capability the relay needs from the network: raw
//! reads against the token and ballot contracts, transaction lookups, and
//! signed writes that resolve once the transaction has one confirmation.
//! `EthersChain` implements it over any ethers middleware; the relay runs it
//! over a JSON-RPC provider with a local signer.

use async_trait::async_trait;
use ethers::abi::Detokenize;
use ethers::contract::ContractCall;
use ethers::prelude::*;
use std::sync::Arc;

use crate::contracts::{MyToken, TokenizedBallot};
use crate::error::RelayError;
use crate::units::hash_hex;

/// Provider with a signing wallet attached
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

#[async_trait]
pub trait BallotChain: Send + Sync {
    /// `MyToken.totalSupply()` in fixed-point units
    async fn total_supply(&self) -> Result<U256, RelayError>;

    /// `MyToken.allowance(owner, spender)` in fixed-point units
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, RelayError>;

    /// Transaction by hash, `None` when the node does not know it
    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>, RelayError>;

    /// Signed `MyToken.mint(to, amount)`, returns the confirmed hash
    async fn mint(&self, to: Address, amount: U256) -> Result<H256, RelayError>;

    /// Signed `MyToken.delegate(delegatee)`, returns the confirmed hash
    async fn delegate(&self, delegatee: Address) -> Result<H256, RelayError>;

    /// Signed `TokenizedBallot.vote(proposal, amount)`, returns the confirmed hash
    async fn vote(&self, proposal: U256, amount: U256) -> Result<H256, RelayError>;

    /// `TokenizedBallot.winningProposal()`
    async fn winning_proposal(&self) -> Result<U256, RelayError>;

    /// `TokenizedBallot.proposals(index)` as `(name, voteCount)`
    async fn proposal(&self, index: U256) -> Result<([u8; 32], U256), RelayError>;
}

pub struct EthersChain<M> {
    client: Arc<M>,
    token: MyToken<M>,
    ballot: TokenizedBallot<M>,
}

impl<M: Middleware> EthersChain<M> {
    /// Bind both contracts to an existing middleware stack
    pub fn new(client: Arc<M>, token_address: Address, ballot_address: Address) -> Self {
        let token = MyToken::new(token_address, client.clone());
        let ballot = TokenizedBallot::new(ballot_address, client.clone());

        Self {
            client,
            token,
            ballot,
        }
    }
}

impl EthersChain<SignerClient> {
    /// Build provider and signer from an RPC URL and a hex private key
    pub fn connect(
        rpc_url: &str,
        private_key: &str,
        chain_id: u64,
        token_address: Address,
        ballot_address: Address,
    ) -> Result<Self, RelayError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| RelayError::Config(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

        let wallet = private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| RelayError::Config(format!("Invalid signer private key: {}", e)))?
            .with_chain_id(chain_id);

        log::info!("Signer address: {:?}", wallet.address());

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        Ok(Self::new(client, token_address, ballot_address))
    }
}

/// Submit a contract call and wait for one confirmation
async fn confirm<M: Middleware, D: Detokenize>(
    label: &str,
    call: ContractCall<M, D>,
) -> Result<H256, RelayError> {
    let pending = call
        .send()
        .await
        .map_err(|e| RelayError::contract(e.to_string()))?;

    let tx_hash = pending.tx_hash();
    log::info!("{} submitted: {}", label, hash_hex(&tx_hash));

    let receipt = pending
        .await
        .map_err(|e| RelayError::provider(e.to_string()))?;

    let confirmed = check_receipt(tx_hash, receipt)?;
    log::info!("{} confirmed: {}", label, hash_hex(&confirmed));

    Ok(confirmed)
}

/// A write only counts once a receipt exists and its status is not 0.
/// The hash reported is the one the receipt carries.
fn check_receipt(
    tx_hash: H256,
    receipt: Option<TransactionReceipt>,
) -> Result<H256, RelayError> {
    let receipt = receipt.ok_or_else(|| RelayError::MissingReceipt(hash_hex(&tx_hash)))?;

    if receipt.status == Some(U64::zero()) {
        return Err(RelayError::Reverted(hash_hex(&receipt.transaction_hash)));
    }

    log::debug!("Receipt in block {:?}", receipt.block_number);
    Ok(receipt.transaction_hash)
}

#[async_trait]
impl<M: Middleware + 'static> BallotChain for EthersChain<M> {
    async fn total_supply(&self) -> Result<U256, RelayError> {
        self.token
            .total_supply()
            .call()
            .await
            .map_err(|e| RelayError::contract(e.to_string()))
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, RelayError> {
        self.token
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| RelayError::contract(e.to_string()))
    }

    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>, RelayError> {
        self.client
            .get_transaction(hash)
            .await
            .map_err(|e| RelayError::provider(e.to_string()))
    }

    async fn mint(&self, to: Address, amount: U256) -> Result<H256, RelayError> {
        confirm("mint", self.token.mint(to, amount)).await
    }

    async fn delegate(&self, delegatee: Address) -> Result<H256, RelayError> {
        confirm("delegate", self.token.delegate(delegatee)).await
    }

    async fn vote(&self, proposal: U256, amount: U256) -> Result<H256, RelayError> {
        confirm("vote", self.ballot.vote(proposal, amount)).await
    }

    async fn winning_proposal(&self) -> Result<U256, RelayError> {
        self.ballot
            .winning_proposal()
            .call()
            .await
            .map_err(|e| RelayError::contract(e.to_string()))
    }

    async fn proposal(&self, index: U256) -> Result<([u8; 32], U256), RelayError> {
        self.ballot
            .proposals(index)
            .call()
            .await
            .map_err(|e| RelayError::contract(e.to_string()))
    }
}
