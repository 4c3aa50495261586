use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8090";
pub const DEFAULT_TRANSACTIONS_URL: &str = "http://localhost:8082";

/// Mule integration gateway fronting the SOAP and payment services.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
}

/// Spring Boot transaction store, reached directly rather than via the
/// gateway.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransactionStoreConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServicesConfig {
    pub gateway: Option<GatewayConfig>,
    pub transactions: Option<TransactionStoreConfig>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        ServicesConfig {
            gateway: Some(GatewayConfig {
                base_url: DEFAULT_GATEWAY_URL.to_string(),
            }),
            transactions: Some(TransactionStoreConfig {
                base_url: DEFAULT_TRANSACTIONS_URL.to_string(),
            }),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    /// Currency used for payments when none is given on the command line.
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            services: ServicesConfig::default(),
            default_currency: default_currency(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            // Everything has a sensible default for the demo stack, so a
            // missing config file is not an error.
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "bankctl", "bankctl")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
