//! Trade client for Hyperspace marketplace writes
//!
//! Every write follows the same chain of awaited calls: ensure the exchange
//! is approved for the asset, ask the API to build the trade, then either
//! sign the returned order and register it through `validate-signature`, or
//! sign and broadcast the returned calldata.
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperspace::{Amount, TradeClient};
//!
//! let client = TradeClient::new(api_key, wallet, rpc_url)?;
//!
//! // Bid 1.5 AVAX on every token of a collection
//! let outcome = client
//!     .create_collection_bid("0xcollection", Amount::from(1_500_000_000u64))
//!     .await?;
//!
//! // Buy a listing returned by the query client
//! let outcome = client.buy_nft("0xcollection", "42", price, listing["metadata"].clone()).await?;
//! if let Some(digest) = outcome.digest {
//!     println!("bought in {}", digest);
//! }
//! ```

mod client;
mod types;

pub use client::{Result, TradeClient, TradeError};
pub use types::*;
