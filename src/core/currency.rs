//! Country and currency lookup abstractions and core types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label attached to records resolved through the SOAP-backed gateway.
pub const SOAP_SERVICE: &str = "SOAP Service";

/// A country as listed by the gateway. The wire names come from the
/// underlying SOAP service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    #[serde(rename = "sISOCode")]
    pub code: String,
    #[serde(rename = "sName")]
    pub name: String,
}

impl CountryRef {
    pub fn new(code: &str, name: &str) -> Self {
        CountryRef {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// The outcome of resolving one country's currency. Error outcomes are data,
/// not panics: `currency_code` becomes `"Error"` and `error` holds the text.
///
/// Records are replaced wholesale on refresh or retry, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRecord {
    pub country_code: String,
    pub country_name: String,
    /// ISO currency code, `"N/A"` when the service has no data, `"Error"`
    /// when the lookup failed.
    pub currency_code: String,
    /// Currency display name, `"N/A"` or `"Failed to fetch"` likewise.
    pub currency_name: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub error: Option<String>,
    /// Raw upstream payload, kept for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl CurrencyRecord {
    pub fn is_failed(&self) -> bool {
        self.error.is_some() || self.currency_code == "Error"
    }
}

#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Lists the countries to resolve. Never fails: upstream trouble is
    /// absorbed into the static fallback table.
    async fn list_countries(&self) -> Vec<CountryRef>;
}

#[async_trait]
pub trait CurrencyResolver: Send + Sync {
    /// Resolves one country's currency. Never fails: lookup errors come back
    /// as error-flagged records.
    async fn resolve_currency(&self, code: &str, name: &str) -> CurrencyRecord;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(currency_code: &str, error: Option<&str>) -> CurrencyRecord {
        CurrencyRecord {
            country_code: "US".to_string(),
            country_name: "United States".to_string(),
            currency_code: currency_code.to_string(),
            currency_name: "US Dollar".to_string(),
            service: SOAP_SERVICE.to_string(),
            timestamp: Utc::now(),
            error: error.map(str::to_string),
            raw: None,
        }
    }

    #[test]
    fn test_failed_when_error_text_present() {
        assert!(record("USD", Some("HTTP error! status: 500")).is_failed());
    }

    #[test]
    fn test_failed_when_code_is_error_marker() {
        assert!(record("Error", None).is_failed());
    }

    #[test]
    fn test_na_counts_as_resolved() {
        // "N/A" means the service has no data, not that the lookup failed
        assert!(!record("N/A", None).is_failed());
    }

    #[test]
    fn test_country_deserializes_from_wire_names() {
        let country: CountryRef =
            serde_json::from_str(r#"{"sISOCode": "FR", "sName": "France"}"#).unwrap();
        assert_eq!(country.code, "FR");
        assert_eq!(country.name, "France");
    }
}
