//! Client for the Mule integration gateway: country list and currency
//! lookups (SOAP-backed, JSON-translated) plus payment submission.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::currency::{
    CountryRef, CountrySource, CurrencyRecord, CurrencyResolver, SOAP_SERVICE,
};
use crate::core::error::FetchError;
use crate::core::fallback::fallback_countries;
use crate::core::payment::{PaymentGateway, PaymentReceipt, PaymentRequest};
use crate::providers::USER_AGENT;

pub struct GatewayClient {
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        GatewayClient {
            base_url: base_url.to_string(),
        }
    }

    async fn fetch_countries(&self) -> Result<Vec<CountryRef>, FetchError> {
        let url = format!("{}/countries", self.base_url);
        debug!("Requesting country list from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                message: None,
            });
        }

        let data = response.json::<CountriesResponse>().await?;
        if data.countries.is_empty() {
            return Err(FetchError::Malformed(
                "No countries returned from service".to_string(),
            ));
        }
        Ok(data.countries)
    }

    async fn fetch_currency(&self, code: &str) -> Result<Value, FetchError> {
        let url = format!("{}/currency/{}", self.base_url, code);
        debug!("Requesting currency data from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                message: None,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[derive(Deserialize, Debug)]
struct CountriesResponse {
    countries: Vec<CountryRef>,
}

/// One possible placement of the currency fields inside a gateway response.
/// The SOAP translation has been seen to emit several envelope depths.
#[derive(Deserialize, Debug, Default)]
struct CurrencyFields {
    #[serde(rename = "sISOCode")]
    iso_code: Option<String>,
    #[serde(rename = "sName")]
    name: Option<String>,
    #[serde(rename = "currencyCode")]
    currency_code: Option<String>,
    #[serde(rename = "currencyName")]
    currency_name: Option<String>,
}

/// Parses every known envelope shape in priority order: fully nested
/// response, inner result object, then the flat payload itself.
fn currency_shapes(payload: &Value) -> Vec<CurrencyFields> {
    [
        payload.pointer("/CountryCurrencyResponse/CountryCurrencyResult"),
        payload.pointer("/CountryCurrencyResponse"),
        payload.pointer("/CountryCurrencyResult"),
        Some(payload),
    ]
    .into_iter()
    .flatten()
    .filter_map(|candidate| serde_json::from_value::<CurrencyFields>(candidate.clone()).ok())
    .collect()
}

fn extract_currency(payload: &Value) -> (String, String) {
    let shapes = currency_shapes(payload);

    let code = shapes
        .iter()
        .find_map(|s| s.iso_code.clone())
        .or_else(|| shapes.iter().find_map(|s| s.currency_code.clone()))
        .unwrap_or_else(|| "N/A".to_string());
    let name = shapes
        .iter()
        .find_map(|s| s.name.clone())
        .or_else(|| shapes.iter().find_map(|s| s.currency_name.clone()))
        .unwrap_or_else(|| "N/A".to_string());

    (code, name)
}

#[async_trait]
impl CountrySource for GatewayClient {
    async fn list_countries(&self) -> Vec<CountryRef> {
        match self.fetch_countries().await {
            Ok(countries) => {
                debug!("Successfully fetched {} countries", countries.len());
                countries
            }
            Err(err) => {
                warn!("Failed to fetch countries, using fallback: {err}");
                fallback_countries()
            }
        }
    }
}

#[async_trait]
impl CurrencyResolver for GatewayClient {
    #[instrument(name = "CurrencyFetch", skip(self, name), fields(country = %code))]
    async fn resolve_currency(&self, code: &str, name: &str) -> CurrencyRecord {
        match self.fetch_currency(code).await {
            Ok(payload) => {
                debug!("Currency response for {code}: {payload}");
                let (currency_code, currency_name) = extract_currency(&payload);
                CurrencyRecord {
                    country_code: code.to_string(),
                    country_name: name.to_string(),
                    currency_code,
                    currency_name,
                    service: SOAP_SERVICE.to_string(),
                    timestamp: Utc::now(),
                    error: None,
                    raw: Some(payload),
                }
            }
            Err(err) => {
                warn!("Error fetching currency for {code}: {err}");
                CurrencyRecord {
                    country_code: code.to_string(),
                    country_name: name.to_string(),
                    currency_code: "Error".to_string(),
                    currency_name: "Failed to fetch".to_string(),
                    service: SOAP_SERVICE.to_string(),
                    timestamp: Utc::now(),
                    error: Some(err.to_string()),
                    raw: None,
                }
            }
        }
    }
}

/// Pulls the human-readable error out of a non-2xx payment response body.
fn upstream_error_message(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn process_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt, FetchError> {
        request.validate()?;

        let url = format!("{}/payments", self.base_url);
        debug!("Sending payment to {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Payment error response body: {body}");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let receipt = response.json::<PaymentReceipt>().await?;
        debug!("Payment successful: {}", receipt.transaction_id);
        Ok(receipt)
    }
}
