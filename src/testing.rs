//! In-memory `BallotChain` for tests
//!
//! Reads come from preset values, writes hand out sequential hashes and are
//! recorded so tests can assert what reached the chain.

use async_trait::async_trait;
use ethers::types::{Address, Transaction, H256, U256, U64};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::chain::BallotChain;
use crate::error::RelayError;

/// A write that reached the mock chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Mint { to: Address, amount: U256 },
    Delegate { delegatee: Address },
    Vote { proposal: U256, amount: U256 },
}

#[derive(Default)]
pub struct MockChain {
    total_supply: U256,
    allowances: HashMap<(Address, Address), U256>,
    transactions: HashMap<H256, Transaction>,
    proposals: Vec<([u8; 32], U256)>,
    write_failure: Option<RelayError>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total_supply(mut self, value: U256) -> Self {
        self.total_supply = value;
        self
    }

    pub fn with_allowance(mut self, owner: Address, spender: Address, value: U256) -> Self {
        self.allowances.insert((owner, spender), value);
        self
    }

    /// Register a transaction; `block` of `None` leaves it pending
    pub fn with_transaction(mut self, hash: H256, block: Option<u64>) -> Self {
        let tx = Transaction {
            hash,
            block_number: block.map(U64::from),
            ..Default::default()
        };
        self.transactions.insert(hash, tx);
        self
    }

    pub fn with_proposal(mut self, name: &str, vote_count: U256) -> Self {
        let mut raw = [0u8; 32];
        let bytes = name.as_bytes();
        let len = bytes.len().min(31);
        raw[..len].copy_from_slice(&bytes[..len]);
        self.proposals.push((raw, vote_count));
        self
    }

    /// Make every write fail with `err`
    pub fn failing_writes(mut self, err: RelayError) -> Self {
        self.write_failure = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Hash handed out for the n-th write (1-based)
    pub fn hash_for(n: u64) -> H256 {
        H256::from_low_u64_be(0xba11_0000 + n)
    }

    fn record(&self, call: MockCall) -> Result<H256, RelayError> {
        if let Some(err) = &self.write_failure {
            return Err(err.clone());
        }

        let mut calls = self
            .calls
            .lock()
            .map_err(|_| RelayError::provider("mock chain poisoned"))?;
        calls.push(call);
        Ok(Self::hash_for(calls.len() as u64))
    }
}

#[async_trait]
impl BallotChain for MockChain {
    async fn total_supply(&self) -> Result<U256, RelayError> {
        Ok(self.total_supply)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, RelayError> {
        Ok(self
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>, RelayError> {
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn mint(&self, to: Address, amount: U256) -> Result<H256, RelayError> {
        self.record(MockCall::Mint { to, amount })
    }

    async fn delegate(&self, delegatee: Address) -> Result<H256, RelayError> {
        self.record(MockCall::Delegate { delegatee })
    }

    async fn vote(&self, proposal: U256, amount: U256) -> Result<H256, RelayError> {
        if proposal >= U256::from(self.proposals.len()) {
            return Err(RelayError::contract("execution reverted: invalid proposal"));
        }
        self.record(MockCall::Vote { proposal, amount })
    }

    async fn winning_proposal(&self) -> Result<U256, RelayError> {
        // Same outcome as the contract: no proposals means the call reverts
        let (index, _) = self
            .proposals
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.1.cmp(&b.1).then(ib.cmp(ia)))
            .ok_or_else(|| RelayError::contract("execution reverted: no proposals"))?;
        Ok(U256::from(index))
    }

    async fn proposal(&self, index: U256) -> Result<([u8; 32], U256), RelayError> {
        if index >= U256::from(self.proposals.len()) {
            return Err(RelayError::contract("execution reverted: index out of bounds"));
        }
        Ok(self.proposals[index.as_usize()])
    }
}
