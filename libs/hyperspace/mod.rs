//! Hyperspace SDK
//!
//! Read queries and on-chain trading for the Hyperspace NFT marketplace on
//! Avalanche C-Chain.

pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use domain::{Amount, AmountError, TokenAddress, TradeOutcome};
pub use infrastructure::client::{
    query::{ActionType, ListingSortField, OrderBy, PaginationInfo, QueryClient, QueryResponse, StatsSortField},
    trade::{MarketplaceContracts, TradeClient, TradeError},
    wallet::{EthersWallet, MarketplaceWallet, WalletError},
};
pub use infrastructure::config::{ConfigError, SdkConfig};
pub use infrastructure::logging::init_tracing;
