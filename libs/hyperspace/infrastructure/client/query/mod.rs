//! Query client for Hyperspace marketplace reads
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperspace::infrastructure::client::query::{QueryClient, PaginationInfo};
//!
//! let client = QueryClient::new(api_key);
//!
//! // Listings of a collection, cheapest first
//! let listings = client
//!     .get_collection_listings(
//!         "0xcollection",
//!         Some(vec![OrderBy::asc(ListingSortField::Price)]),
//!         Some(PaginationInfo::page(1, 20)),
//!     )
//!     .await?;
//!
//! // Stats for every collection
//! let stats = client.get_collection_stats(None, None, None).await?;
//! ```

mod client;
mod types;

pub use client::{QueryClient, QueryError, Result};
pub use types::*;
