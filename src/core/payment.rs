//! Payment submission types and the gateway seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::FetchError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: f64,
    pub currency: String,
    pub from_account: String,
    pub to_account: String,
}

impl PaymentRequest {
    /// Client-side checks mirrored from the payment form: all fields filled,
    /// amount strictly positive. Runs before any network call.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.from_account.trim().is_empty()
            || self.to_account.trim().is_empty()
            || self.currency.trim().is_empty()
        {
            return Err(FetchError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if self.amount <= 0.0 {
            return Err(FetchError::Validation(
                "Amount must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub status: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process_payment(&self, request: &PaymentRequest)
    -> Result<PaymentReceipt, FetchError>;
}
