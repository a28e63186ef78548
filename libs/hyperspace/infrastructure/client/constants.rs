//! Hyperspace marketplace constants
//!
//! REST endpoints and contract addresses for Avalanche C-Chain mainnet.

// ============================================================================
// Network Constants
// ============================================================================

/// Chain ID for Avalanche C-Chain
pub const AVALANCHE_CHAIN_ID: u64 = 43114;

/// Public Avalanche C-Chain RPC
pub const AVALANCHE_RPC_URL: &str = "https://api.avax.network/ext/bc/C/rpc";

/// Base URL of the Hyperspace REST API
pub const HYPERSPACE_API_URL: &str = "https://avax.api.hyperspace.xyz/rest";

// ============================================================================
// Contract Addresses (Avalanche C-Chain)
// ============================================================================

/// 0x exchange proxy: approval operator/spender and trade target
pub const EXCHANGE_PROXY: &str = "0xDef1C0ded9bec7F1a1670819833240f027b25EfF";

/// Wrapped AVAX (ERC-20 used to fund collection bids)
pub const WAVAX_ADDRESS: &str = "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7";

// ============================================================================
// Read Endpoints
// ============================================================================

pub const GET_MARKETPLACE_SNAPSHOTS: &str = "get-marketplace-snapshots";
pub const GET_MARKETPLACE_SNAPSHOT: &str = "get-marketplace-snapshot";
pub const GET_COLLECTION_BIDS_FOR_PROJECT: &str = "get-collection-bids-for-project";
pub const GET_COLLECTION_BIDS_FOR_PROJECT_AND_USER: &str =
    "get-collection-bids-for-project-and-user";
pub const GET_COLLECTION_ACTIVITY: &str = "get-collection-activity";
pub const GET_COLLECTION_VIEW: &str = "get-collection-view";
pub const GET_USER_ACTIVITY: &str = "get-user-activity";
pub const GET_PROJECT_STATS: &str = "get-project-stats";

// ============================================================================
// Write Endpoints
// ============================================================================

pub const VALIDATE_SIGNATURE: &str = "validate-signature";
pub const CREATE_COLLECTION_BID_TX: &str = "create-collection-bid-tx";
pub const CREATE_LIST_TX: &str = "create-list-tx";
pub const CREATE_BUY_TX: &str = "create-buy-tx";
pub const CREATE_ACCEPT_COLLECTION_BID_TX: &str = "create-accept-collection-bid-tx";
pub const CREATE_DELIST_TX: &str = "create-delist-tx";
pub const CREATE_CANCEL_COLLECTION_BID_TX: &str = "create-cancel-collection-bid-tx";

/// Listing type for regular fixed-price listings
pub const LISTING_TYPE_NORMAL: &str = "NORMAL";
