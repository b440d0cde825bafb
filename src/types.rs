//! Request and response DTOs shared by the API server and the client
//!
//! Field names follow the camelCase JSON shape the frontend consumes.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel hash for envelopes produced by read-only operations
pub const NO_HASH: &str = "No hash. It was reading operation.";

/// Sentinel explorer link for envelopes produced by read-only operations
pub const NO_EXPLORER_LINK: &str = "No etherscan link. It was reading operation.";

/// POST /request-tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestTokenRequest {
    pub address: String,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
}

/// POST /delegate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegateRequest {
    pub delegatee: String,
}

/// POST /vote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub proposal_id: String,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
}

// Browser forms post numbers as strings and ids as numbers; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
    })
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", text))),
        Loose::Number(number) => number
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
    }
}

/// Query string of GET /allowance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceQuery {
    pub from: String,
    pub to: String,
}

/// GET /my-token-contract-address, GET /tokenized-ballot-contract-address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub message: String,
    pub transaction_hash: String,
    pub etherscan_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
    pub detailed_message: String,
}

/// Result envelope of every write and of the winning-proposal read.
///
/// Serialized as the inner object plus a `status` tag, so a success body
/// never carries `detailedMessage` and an error body never carries
/// `transactionHash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TxOutcome {
    Success(TransactionResponse),
    Error(ErrorMessage),
}

impl TxOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TxOutcome::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            TxOutcome::Success(resp) => &resp.message,
            TxOutcome::Error(err) => &err.message,
        }
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        match self {
            TxOutcome::Success(resp) => Some(&resp.transaction_hash),
            TxOutcome::Error(_) => None,
        }
    }
}

/// Decoded winning proposal of the ballot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub index: u64,
    pub name: String,
    pub vote_count: f64,
}

/// Mined state of a transaction as reported by GET /transaction-status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Success,
    Fail,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Success => "Success",
            TxStatus::Fail => "Fail",
        }
    }
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TxStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Success" => Ok(TxStatus::Success),
            "Fail" => Ok(TxStatus::Fail),
            other => Err(format!("Unknown transaction status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let outcome = TxOutcome::Success(TransactionResponse {
            message: "ok".to_string(),
            transaction_hash: "0x01".to_string(),
            etherscan_link: "https://goerli.etherscan.io/tx/0x01".to_string(),
        });

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["transactionHash"], "0x01");
        assert!(value.get("detailedMessage").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let outcome = TxOutcome::Error(ErrorMessage {
            message: "failed".to_string(),
            detailed_message: "{}".to_string(),
        });

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["detailedMessage"], "{}");
        assert!(value.get("transactionHash").is_none());
        assert_eq!(outcome.transaction_hash(), None);
    }

    #[test]
    fn test_vote_request_field_names() {
        let req: VoteRequest =
            serde_json::from_value(json!({ "proposalId": "1", "amount": 5000 })).unwrap();
        assert_eq!(req.proposal_id, "1");
        assert_eq!(req.amount, 5000.0);
    }

    #[test]
    fn test_vote_request_accepts_form_values() {
        let req: VoteRequest =
            serde_json::from_value(json!({ "proposalId": 2, "amount": "12.5" })).unwrap();
        assert_eq!(req.proposal_id, "2");
        assert_eq!(req.amount, 12.5);

        let bad = serde_json::from_value::<VoteRequest>(json!({ "proposalId": 2, "amount": "lots" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_tx_status_parse() {
        assert_eq!("Success".parse::<TxStatus>().unwrap(), TxStatus::Success);
        assert_eq!("Fail".parse::<TxStatus>().unwrap(), TxStatus::Fail);
        assert!("Pending".parse::<TxStatus>().is_err());
    }
}
