//! Infrastructure Layer
//!
//! HTTP and chain clients, configuration and logging setup.
//! This layer depends on the domain layer.

pub mod client;
pub mod config;
pub mod logging;

pub use client::{
    EthersWallet, MarketplaceContracts, MarketplaceWallet, QueryClient, QueryError, TradeClient,
    TradeError, WalletError,
};
pub use config::{ConfigError, SdkConfig};
pub use logging::init_tracing;
