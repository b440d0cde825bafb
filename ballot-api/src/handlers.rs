/// Axum HTTP handlers for the relay endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use tokenized_ballot::{
    AddressResponse, AllowanceQuery, DelegateRequest, RelayError, RelayService,
    RequestTokenRequest, Transaction, TxOutcome, VoteRequest,
};

/// Shared application state
pub type AppState = Arc<RelayService>;

/// Error type for read handlers. Writes never produce one: their failures
/// travel inside the `TxOutcome` envelope with a 200 status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        if err.is_input_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            log::error!("Chain read failed: {}", err);
            ApiError::Upstream(err.to_string())
        }
    }
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /my-token-contract-address
pub async fn get_my_token_contract_address(
    State(service): State<AppState>,
) -> Json<AddressResponse> {
    Json(AddressResponse {
        result: service.my_token_address(),
    })
}

/// GET /tokenized-ballot-contract-address
pub async fn get_tokenized_ballot_contract_address(
    State(service): State<AppState>,
) -> Json<AddressResponse> {
    Json(AddressResponse {
        result: service.tokenized_ballot_address(),
    })
}

/// GET /total-supply
/// Returns the token supply as a decimal number
pub async fn get_total_supply(State(service): State<AppState>) -> Result<Json<f64>, ApiError> {
    let supply = service.total_supply().await?;
    Ok(Json(supply))
}

/// GET /allowance?from=..&to=..
pub async fn get_allowance(
    State(service): State<AppState>,
    Query(query): Query<AllowanceQuery>,
) -> Result<Json<f64>, ApiError> {
    let allowance = service.allowance(&query.from, &query.to).await?;
    Ok(Json(allowance))
}

/// GET /transaction-status/:txn_hash
/// Returns `Success` or `Fail` as plain text
pub async fn get_transaction_status(
    State(service): State<AppState>,
    Path(txn_hash): Path<String>,
) -> Result<String, ApiError> {
    let status = service.transaction_status(&txn_hash).await?;
    Ok(status.to_string())
}

/// GET /transaction-receipt/:txn_hash
/// Returns the transaction object, or `null` when the node does not know it
pub async fn get_transaction_receipt(
    State(service): State<AppState>,
    Path(txn_hash): Path<String>,
) -> Result<Json<Option<Transaction>>, ApiError> {
    let tx = service.transaction_receipt(&txn_hash).await?;
    Ok(Json(tx))
}

/// POST /request-tokens
/// Mints tokens from the relay signer to the requested address
pub async fn request_tokens(
    State(service): State<AppState>,
    Json(req): Json<RequestTokenRequest>,
) -> Json<TxOutcome> {
    log::info!("Minting {} MTK to {}", req.amount, req.address);
    Json(service.request_tokens(&req.address, req.amount).await)
}

/// POST /delegate
pub async fn delegate(
    State(service): State<AppState>,
    Json(req): Json<DelegateRequest>,
) -> Json<TxOutcome> {
    log::info!("Delegating votes to {}", req.delegatee);
    Json(service.delegate(&req.delegatee).await)
}

/// POST /vote
pub async fn vote(State(service): State<AppState>, Json(req): Json<VoteRequest>) -> Json<TxOutcome> {
    log::info!("Voting {} on proposal {}", req.amount, req.proposal_id);
    Json(service.vote(&req.proposal_id, req.amount).await)
}

/// GET /winning-proposal
pub async fn get_winning_proposal(State(service): State<AppState>) -> Json<TxOutcome> {
    Json(service.winning_proposal().await)
}
