//! Typed HTTP client for the relay API
//!
//! One method per endpoint. Write methods return the `TxOutcome` envelope so
//! callers match on success/error instead of probing for fields.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use tokenized_ballot::{
    AddressResponse, DelegateRequest, RequestTokenRequest, Transaction, TxOutcome, TxStatus,
    VoteRequest,
};

use crate::error::ClientError;

pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn my_token_contract_address(&self) -> Result<String, ClientError> {
        let resp: AddressResponse = self.get_json("/my-token-contract-address").await?;
        Ok(resp.result)
    }

    pub async fn tokenized_ballot_contract_address(&self) -> Result<String, ClientError> {
        let resp: AddressResponse = self.get_json("/tokenized-ballot-contract-address").await?;
        Ok(resp.result)
    }

    pub async fn total_supply(&self) -> Result<f64, ClientError> {
        self.get_json("/total-supply").await
    }

    pub async fn allowance(&self, from: &str, to: &str) -> Result<f64, ClientError> {
        let url = format!("{}/allowance", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("from", from), ("to", to)])
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Self::decode(response).await
    }

    pub async fn transaction_status(&self, txn_hash: &str) -> Result<TxStatus, ClientError> {
        let text = self
            .get_text(&format!("/transaction-status/{}", txn_hash))
            .await?;
        text.parse::<TxStatus>().map_err(ClientError::InvalidResponse)
    }

    pub async fn transaction_receipt(
        &self,
        txn_hash: &str,
    ) -> Result<Option<Transaction>, ClientError> {
        self.get_json(&format!("/transaction-receipt/{}", txn_hash))
            .await
    }

    pub async fn request_tokens(&self, address: &str, amount: f64) -> Result<TxOutcome, ClientError> {
        let body = RequestTokenRequest {
            address: address.to_string(),
            amount,
        };
        self.post_json("/request-tokens", &body).await
    }

    pub async fn delegate(&self, delegatee: &str) -> Result<TxOutcome, ClientError> {
        let body = DelegateRequest {
            delegatee: delegatee.to_string(),
        };
        self.post_json("/delegate", &body).await
    }

    pub async fn vote(&self, proposal_id: &str, amount: f64) -> Result<TxOutcome, ClientError> {
        let body = VoteRequest {
            proposal_id: proposal_id.to_string(),
            amount,
        };
        self.post_json("/vote", &body).await
    }

    pub async fn winning_proposal(&self) -> Result<TxOutcome, ClientError> {
        self.get_json("/winning-proposal").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Self::decode(response).await
    }

    async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(text);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
