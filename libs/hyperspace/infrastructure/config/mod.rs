//! SDK configuration
//!
//! Non-secret settings come from YAML; the API key and private key are read
//! from the environment (or `.env`) only.

use super::client::constants::{AVALANCHE_CHAIN_ID, AVALANCHE_RPC_URL, HYPERSPACE_API_URL};
use super::client::query::QueryClient;
use super::client::trade::{MarketplaceContracts, TradeClient};
use super::client::wallet::{parse_private_key, EthersWallet, WalletError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const API_KEY_ENV: &str = "HYPERSPACE_API_KEY";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const RPC_URL_ENV: &str = "AVAX_RPC_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarMissing(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// API key from .env (not in YAML)
    #[serde(skip)]
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
        }
    }
}

fn default_api_url() -> String {
    HYPERSPACE_API_URL.to_string()
}

fn default_rpc_url() -> String {
    AVALANCHE_RPC_URL.to_string()
}

fn default_chain_id() -> u64 {
    AVALANCHE_CHAIN_ID
}

/// Main SDK configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub contracts: MarketplaceContracts,

    /// Private key from .env (not in YAML)
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl SdkConfig {
    /// Load configuration from YAML file and .env
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml_str(&yaml_content)?;

        dotenv::dotenv().ok(); // Don't fail if .env doesn't exist
        config.apply_overrides(|key| std::env::var(key).ok());

        config.validate()?;
        Ok(config)
    }

    /// Parse YAML only; secrets stay empty and nothing is validated
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Defaults plus environment, without a YAML file
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = SdkConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok());

        config.validate()?;
        Ok(config)
    }

    /// Apply secrets and overrides from a variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.api.api_key = api_key;
        }

        if let Some(private_key) = lookup(PRIVATE_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.private_key = Some(private_key);
        }

        if let Some(rpc_url) = lookup(RPC_URL_ENV) {
            info!("Overriding RPC url from environment variable");
            self.chain.rpc_url = rpc_url;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }

        if self.api.api_key.trim().is_empty() {
            return Err(ConfigError::EnvVarMissing(API_KEY_ENV.to_string()));
        }

        if self.chain.rpc_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "chain.rpc_url must not be empty".to_string(),
            ));
        }

        if self.chain.chain_id == 0 {
            return Err(ConfigError::ValidationError(
                "chain.chain_id must be greater than 0".to_string(),
            ));
        }

        if let Some(key) = &self.private_key {
            parse_private_key(key).map_err(|_| {
                ConfigError::ValidationError(format!("{} is not a valid private key", PRIVATE_KEY_ENV))
            })?;
        }

        Ok(())
    }

    pub fn query_client(&self) -> QueryClient {
        QueryClient::new(self.api.api_key.clone()).with_base_url(self.api.base_url.clone())
    }

    /// Trade client for the configured key, chain and contracts
    pub fn trade_client(&self) -> Result<TradeClient<EthersWallet>> {
        let private_key = self
            .private_key
            .as_deref()
            .ok_or_else(|| ConfigError::EnvVarMissing(PRIVATE_KEY_ENV.to_string()))?;

        let wallet = parse_private_key(private_key)?;
        let wallet = EthersWallet::with_chain_id(wallet, &self.chain.rpc_url, self.chain.chain_id)?;

        Ok(TradeClient::with_wallet(self.api.api_key.clone(), wallet)
            .with_base_url(self.api.base_url.clone())
            .with_contracts(self.contracts))
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  API: {}", self.api.base_url);
        info!("  RPC: {} (chain {})", self.chain.rpc_url, self.chain.chain_id);
        info!("  Exchange: {:?}", self.contracts.exchange);
        info!("  Trading enabled: {}", self.private_key.is_some());
    }
}
