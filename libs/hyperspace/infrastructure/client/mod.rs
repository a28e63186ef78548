//! Hyperspace API and chain clients
//!
//! The query client covers the read endpoints; the trade client combines the
//! build endpoints with a [`MarketplaceWallet`] for signing and submission.

pub mod approval;
pub mod constants;
pub mod contracts;
pub mod helpers;
pub mod query;
pub mod trade;
pub mod wallet;

pub use approval::{ensure_collection_approval, ensure_erc20_allowance, ApprovalError, ApprovalStatus};
pub use query::{
    ActionType, ListingSortField, OrderBy, PaginationInfo, QueryClient, QueryError, QueryResponse,
    SortOrder, StatsSortField,
};
pub use trade::{MarketplaceContracts, TradeClient, TradeError};
pub use wallet::{EthersWallet, MarketplaceWallet, WalletError};
