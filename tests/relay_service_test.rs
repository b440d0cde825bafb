//! RelayService Integration Tests
//!
//! Exercises every relay operation against the in-memory `MockChain`:
//! fixed-point conversion on reads, envelope shaping on writes, and the
//! catch-all failure policy.
//!
//! Run with: cargo test --test relay_service_test -- --nocapture

use std::sync::Arc;
use tokenized_ballot::testing::{MockCall, MockChain};
use tokenized_ballot::types::{NO_EXPLORER_LINK, NO_HASH};
use tokenized_ballot::{
    Address, ContractAddresses, RelayError, RelayService, TxOutcome, TxStatus, H256, U256,
};

const RECIPIENT: &str = "0xfcC5fB101131630Bd2154A7f0BcDC433159325c6";
const SPENDER: &str = "0x9A750A01629649975DC1F4e608aB203016F55180";
const EXPLORER: &str = "https://goerli.etherscan.io";

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn tokens(whole: u64) -> U256 {
    U256::from(whole) * U256::exp10(18)
}

fn addresses() -> ContractAddresses {
    ContractAddresses {
        my_token: "0x9A750A01629649975DC1F4e608aB203016F55180".parse().unwrap(),
        tokenized_ballot: "0xD7B7419e9FaC3D687a206e0656Ec7938049aA9e2".parse().unwrap(),
    }
}

fn service(chain: MockChain) -> (RelayService, Arc<MockChain>) {
    init_logger();
    let chain = Arc::new(chain);
    let service = RelayService::new(chain.clone(), addresses(), EXPLORER);
    (service, chain)
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_contract_addresses_are_checksummed() {
    let (service, _) = service(MockChain::new());

    assert_eq!(
        service.my_token_address(),
        "0x9A750A01629649975DC1F4e608aB203016F55180"
    );
    assert_eq!(
        service.tokenized_ballot_address(),
        "0xD7B7419e9FaC3D687a206e0656Ec7938049aA9e2"
    );
}

#[tokio::test]
async fn test_total_supply_is_formatted() {
    let supply = tokens(15_000) + U256::exp10(17) * 5;
    let (service, _) = service(MockChain::new().with_total_supply(supply));

    let total = service.total_supply().await.expect("total supply failed");
    assert_eq!(total, 15_000.5);
}

#[tokio::test]
async fn test_allowance_is_non_negative() {
    let owner: Address = RECIPIENT.parse().unwrap();
    let spender: Address = SPENDER.parse().unwrap();
    let (service, _) = service(MockChain::new().with_allowance(owner, spender, tokens(42)));

    let allowance = service.allowance(RECIPIENT, SPENDER).await.unwrap();
    assert_eq!(allowance, 42.0);

    // Unknown pair reads as zero, never negative
    let reverse = service.allowance(SPENDER, RECIPIENT).await.unwrap();
    assert!(reverse >= 0.0);
    assert_eq!(reverse, 0.0);
}

#[tokio::test]
async fn test_allowance_rejects_bad_address() {
    let (service, _) = service(MockChain::new());

    let err = service.allowance("not-an-address", SPENDER).await.unwrap_err();
    assert!(matches!(err, RelayError::InvalidAddress(_)));
}

#[tokio::test]
async fn test_transaction_status() {
    let mined = H256::repeat_byte(0x11);
    let pending = H256::repeat_byte(0x22);
    let unknown = H256::repeat_byte(0x33);
    let (service, _) = service(
        MockChain::new()
            .with_transaction(mined, Some(9_000_000))
            .with_transaction(pending, None),
    );

    let status = |hash: H256| format!("{:?}", hash);
    assert_eq!(
        service.transaction_status(&status(mined)).await.unwrap(),
        TxStatus::Success
    );
    assert_eq!(
        service.transaction_status(&status(pending)).await.unwrap(),
        TxStatus::Fail
    );
    assert_eq!(
        service.transaction_status(&status(unknown)).await.unwrap(),
        TxStatus::Fail
    );
}

#[tokio::test]
async fn test_transaction_receipt() {
    let mined = H256::repeat_byte(0x11);
    let (service, _) = service(MockChain::new().with_transaction(mined, Some(7)));

    let tx = service
        .transaction_receipt(&format!("{:?}", mined))
        .await
        .unwrap()
        .expect("transaction should be known");
    assert_eq!(tx.hash, mined);

    let missing = service
        .transaction_receipt(&format!("{:?}", H256::zero()))
        .await
        .unwrap();
    assert!(missing.is_none());

    let err = service.transaction_receipt("0x1234").await.unwrap_err();
    assert!(matches!(err, RelayError::InvalidHash(_)));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_request_tokens_success() {
    let (service, chain) = service(MockChain::new());

    let outcome = service.request_tokens(RECIPIENT, 5000.0).await;
    let expected_hash = format!("{:?}", MockChain::hash_for(1));

    match &outcome {
        TxOutcome::Success(resp) => {
            assert_eq!(
                resp.message,
                format!("Successfully minted 5000 MTK to {}.", RECIPIENT)
            );
            assert_eq!(resp.transaction_hash, expected_hash);
            assert_eq!(
                resp.etherscan_link,
                format!("{}/tx/{}", EXPLORER, expected_hash)
            );
        }
        TxOutcome::Error(err) => panic!("mint failed: {:?}", err),
    }

    assert_eq!(
        chain.calls(),
        vec![MockCall::Mint {
            to: RECIPIENT.parse().unwrap(),
            amount: tokens(5000),
        }]
    );
}

#[tokio::test]
async fn test_request_tokens_failure_has_no_hash() {
    let (service, chain) = service(
        MockChain::new().failing_writes(RelayError::contract("execution reverted: not minter")),
    );

    let outcome = service.request_tokens(RECIPIENT, 10.0).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.transaction_hash(), None);

    let value = serde_json::to_value(&outcome).unwrap();
    assert!(value.get("transactionHash").is_none());
    assert_eq!(
        value["message"],
        format!("Error while minting tokens to {}", RECIPIENT)
    );

    let detail: serde_json::Value =
        serde_json::from_str(value["detailedMessage"].as_str().unwrap()).unwrap();
    assert_eq!(detail["kind"], "contract");
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_request_tokens_invalid_input_is_enveloped() {
    let (service, chain) = service(MockChain::new());

    let bad_address = service.request_tokens("0xabc", 1.0).await;
    let bad_amount = service.request_tokens(RECIPIENT, -3.0).await;

    for outcome in [bad_address, bad_amount] {
        match outcome {
            TxOutcome::Error(err) => assert!(!err.detailed_message.is_empty()),
            TxOutcome::Success(resp) => panic!("unexpected success: {:?}", resp),
        }
    }
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_delegate() {
    let (service, chain) = service(MockChain::new());

    let outcome = service.delegate(RECIPIENT).await;
    assert_eq!(
        outcome.message(),
        format!(
            "Successfully delegated votes to account address {}.",
            RECIPIENT
        )
    );
    assert_eq!(
        chain.calls(),
        vec![MockCall::Delegate {
            delegatee: RECIPIENT.parse().unwrap()
        }]
    );

    let failed = service.delegate("nobody").await;
    assert_eq!(failed.message(), "Error delegating to nobody");
}

#[tokio::test]
async fn test_vote_passes_amount_unscaled() {
    let (service, chain) = service(
        MockChain::new()
            .with_proposal("Chocolate", U256::zero())
            .with_proposal("Vanilla", U256::zero()),
    );

    let outcome = service.vote("1", 5000.0).await;
    assert!(outcome.is_success(), "vote failed: {:?}", outcome);
    assert_eq!(
        outcome.message(),
        "Successfully voted for proposal with ID 1."
    );
    assert_eq!(
        chain.calls(),
        vec![MockCall::Vote {
            proposal: U256::from(1),
            amount: U256::from(5000),
        }]
    );
}

#[tokio::test]
async fn test_vote_fractional_amount_is_enveloped() {
    let (service, chain) = service(MockChain::new().with_proposal("Only", U256::zero()));

    match service.vote("0", 2.5).await {
        TxOutcome::Error(err) => {
            assert_eq!(err.message, "Error voting for proposal Id: 0");
            let detail: serde_json::Value = serde_json::from_str(&err.detailed_message).unwrap();
            assert_eq!(detail["kind"], "invalid_amount");
        }
        TxOutcome::Success(resp) => panic!("unexpected success: {:?}", resp),
    }
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_request_tokens_below_smallest_unit_is_enveloped() {
    let (service, chain) = service(MockChain::new());

    match service.request_tokens(RECIPIENT, 1e-19).await {
        TxOutcome::Error(err) => {
            assert_eq!(err.message, format!("Error while minting tokens to {}", RECIPIENT));
        }
        TxOutcome::Success(resp) => panic!("unexpected success: {:?}", resp),
    }
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_vote_on_missing_proposal_is_enveloped() {
    let (service, _) = service(MockChain::new().with_proposal("Only", U256::zero()));

    let outcome = service.vote("7", 1.0).await;
    match outcome {
        TxOutcome::Error(err) => {
            assert_eq!(err.message, "Error voting for proposal Id: 7");
            assert!(err.detailed_message.contains("invalid proposal"));
        }
        TxOutcome::Success(resp) => panic!("unexpected success: {:?}", resp),
    }
}

// ============================================================================
// Winning proposal
// ============================================================================

#[tokio::test]
async fn test_winning_proposal() {
    let (service, _) = service(
        MockChain::new()
            .with_proposal("Chocolate", tokens(10))
            .with_proposal("Vanilla", tokens(30))
            .with_proposal("Lemon", tokens(5)),
    );

    let summary = service.winning_proposal_summary().await.unwrap();
    assert_eq!(summary.index, 1);
    assert_eq!(summary.name, "Vanilla");
    assert_eq!(summary.vote_count, 30.0);

    match service.winning_proposal().await {
        TxOutcome::Success(resp) => {
            assert_eq!(
                resp.message,
                "Winning proposal ID: 1. Proposal name: Vanilla. Proposal vote count: 30."
            );
            assert_eq!(resp.transaction_hash, NO_HASH);
            assert_eq!(resp.etherscan_link, NO_EXPLORER_LINK);
        }
        TxOutcome::Error(err) => panic!("winning proposal failed: {:?}", err),
    }
}

#[tokio::test]
async fn test_winning_proposal_without_proposals_is_enveloped() {
    let (service, _) = service(MockChain::new());

    match service.winning_proposal().await {
        TxOutcome::Error(err) => {
            assert_eq!(err.message, "Error while getting winning proposal.");
            assert!(err.detailed_message.contains("no proposals"));
        }
        TxOutcome::Success(resp) => panic!("unexpected success: {:?}", resp),
    }
}
