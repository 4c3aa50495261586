//! Core domain types and orchestration for the banking client

pub mod aggregate;
pub mod config;
pub mod currency;
pub mod error;
pub mod fallback;
pub mod log;
pub mod payment;
pub mod transaction;

// Re-export main types for cleaner imports
pub use aggregate::{Aggregator, FetchPolicy, RetryOutcome};
pub use currency::{CountryRef, CountrySource, CurrencyRecord, CurrencyResolver};
pub use error::FetchError;
pub use payment::{PaymentGateway, PaymentReceipt, PaymentRequest};
pub use transaction::{Transaction, TransactionSource};
