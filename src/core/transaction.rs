//! Transaction history types and the store seam.

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::error::FetchError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub amount: f64,
    pub currency: String,
    pub from_account: String,
    pub to_account: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Returns transactions in the order the store sent them.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, FetchError>;
}
