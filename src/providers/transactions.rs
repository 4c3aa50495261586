//! Client for the transaction store, reached directly on its own port.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::error::FetchError;
use crate::core::transaction::{Transaction, TransactionSource};
use crate::providers::USER_AGENT;

pub struct TransactionStoreClient {
    base_url: String,
}

impl TransactionStoreClient {
    pub fn new(base_url: &str) -> Self {
        TransactionStoreClient {
            base_url: base_url.to_string(),
        }
    }
}

/// Canonical store response. The list always arrives wrapped; extra fields
/// like `count` and `status` ride along and are ignored.
#[derive(Deserialize, Debug)]
struct TransactionsResponse {
    transactions: Vec<Transaction>,
}

#[async_trait]
impl TransactionSource for TransactionStoreClient {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, FetchError> {
        let url = format!("{}/transactions", self.base_url);
        debug!("Requesting transactions from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                message: None,
            });
        }

        let payload = response.json::<Value>().await?;
        // A bare top-level array means the store contract changed; reject it
        // loudly instead of guessing.
        if payload.is_array() {
            return Err(FetchError::Malformed(
                "expected {\"transactions\": [...]}, got a bare array".to_string(),
            ));
        }

        let data: TransactionsResponse = serde_json::from_value(payload)
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        debug!("Fetched {} transactions", data.transactions.len());
        Ok(data.transactions)
    }
}
