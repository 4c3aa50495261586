pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use anyhow::Result;
use tracing::{debug, info};

/// Payment options as given on the command line; the currency falls back to
/// the configured default when omitted.
#[derive(Debug, Clone)]
pub struct PayOptions {
    pub amount: f64,
    pub currency: Option<String>,
    pub from_account: String,
    pub to_account: String,
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Currencies { retry_failed: bool },
    Pay(PayOptions),
    Transactions,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Banking client starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let gateway_url = config
        .services
        .gateway
        .as_ref()
        .map_or(config::DEFAULT_GATEWAY_URL, |g| &g.base_url);
    let gateway = providers::gateway::GatewayClient::new(gateway_url);

    match command {
        AppCommand::Currencies { retry_failed } => {
            cli::currencies::run(&gateway, &gateway, retry_failed).await
        }
        AppCommand::Pay(options) => {
            let request = core::payment::PaymentRequest {
                amount: options.amount,
                currency: options
                    .currency
                    .unwrap_or_else(|| config.default_currency.clone()),
                from_account: options.from_account,
                to_account: options.to_account,
            };
            cli::pay::run(&gateway, &request).await
        }
        AppCommand::Transactions => {
            let store_url = config
                .services
                .transactions
                .as_ref()
                .map_or(config::DEFAULT_TRANSACTIONS_URL, |t| &t.base_url);
            let store = providers::transactions::TransactionStoreClient::new(store_url);
            cli::transactions::run(&store).await
        }
    }
}
