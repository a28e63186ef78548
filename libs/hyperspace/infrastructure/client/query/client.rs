//! Query client for the Hyperspace read endpoints
//!
//! Each operation builds the endpoint's condition, POSTs it with the API key
//! and hands back the parsed response. Inputs are not validated locally; the
//! API rejects malformed conditions and that error is returned as-is.

use super::super::constants::*;
use super::super::helpers::{read_json, require_success};
use super::types::*;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error on {endpoint} ({status}): {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;

/// Stateless client for the marketplace REST API
#[derive(Clone)]
pub struct QueryClient {
    pub(crate) base_url: String,
    api_key: String,
    client: Client,
}

impl QueryClient {
    /// Create a client against the public Hyperspace API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: HYPERSPACE_API_URL.to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Point the client at another deployment
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body to `<base>/<endpoint>` with the API key
    ///
    /// Non-2xx responses become [`QueryError::Api`].
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<QueryResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.api_key)
            .json(body)
            .send()
            .await?;
        let response = require_success(response, endpoint).await?;

        let status = response.status().as_u16();
        let data = read_json(response).await?;

        debug!("{} responded with {}", endpoint, status);
        Ok(QueryResponse { status, data })
    }

    /// Tokens currently held by `owner`, optionally within one collection
    pub async fn get_user_owned_nfts(
        &self,
        owner: &str,
        collection: Option<&str>,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request: QueryRequest<_> = QueryRequest::new(Some(OwnedNftsCondition {
            owner_address: owner.to_string(),
            contract_address: collection.map(str::to_string),
        }))
        .with_pagination(pagination);

        self.post_json(GET_MARKETPLACE_SNAPSHOTS, &request).await
    }

    /// All collection-level bids for a collection
    pub async fn get_collection_bids(
        &self,
        collection: &str,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request: QueryRequest<_> = QueryRequest::new(Some(CollectionCondition {
            contract_address: collection.to_string(),
        }))
        .with_pagination(pagination);

        self.post_json(GET_COLLECTION_BIDS_FOR_PROJECT, &request).await
    }

    /// Collection bids placed by one wallet
    pub async fn get_user_collection_bids(
        &self,
        collection: &str,
        wallet: &str,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request: QueryRequest<_> = QueryRequest::new(Some(UserCollectionBidsCondition {
            contract_address: collection.to_string(),
            buyer_address: wallet.to_string(),
        }))
        .with_pagination(pagination);

        self.post_json(GET_COLLECTION_BIDS_FOR_PROJECT_AND_USER, &request)
            .await
    }

    /// Active normal listings of `owner`
    pub async fn get_user_listings(
        &self,
        owner: &str,
        collection: Option<&str>,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request: QueryRequest<_> = QueryRequest::new(Some(UserListingsCondition {
            owner_address: owner.to_string(),
            listing_type: LISTING_TYPE_NORMAL,
            contract_address: collection.map(str::to_string),
        }))
        .with_pagination(pagination);

        self.post_json(GET_MARKETPLACE_SNAPSHOT, &request).await
    }

    /// Activity feed of a collection
    pub async fn get_collection_activity(
        &self,
        collection: &str,
        action_types: Option<Vec<ActionType>>,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request: QueryRequest<_> = QueryRequest::new(Some(CollectionActivityCondition {
            contract_address: collection.to_string(),
            action_types,
        }))
        .with_pagination(pagination);

        self.post_json(GET_COLLECTION_ACTIVITY, &request).await
    }

    /// Active listings of a collection
    pub async fn get_collection_listings(
        &self,
        collection: &str,
        order_by: Option<Vec<OrderBy<ListingSortField>>>,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request = QueryRequest::new(Some(CollectionCondition {
            contract_address: collection.to_string(),
        }))
        .with_order_by(order_by)
        .with_pagination(pagination);

        self.post_json(GET_COLLECTION_VIEW, &request).await
    }

    /// Activity feed of a wallet
    pub async fn get_user_activity(
        &self,
        owner: &str,
        action_types: Option<Vec<ActionType>>,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let request: QueryRequest<_> = QueryRequest::new(Some(UserActivityCondition {
            owner_address: owner.to_string(),
            action_types,
        }))
        .with_pagination(pagination);

        self.post_json(GET_USER_ACTIVITY, &request).await
    }

    /// Aggregate stats for one collection, or for all when `collection` is None
    pub async fn get_collection_stats(
        &self,
        collection: Option<&str>,
        order_by: Option<Vec<OrderBy<StatsSortField>>>,
        pagination: Option<PaginationInfo>,
    ) -> Result<QueryResponse> {
        let condition = collection.map(|id| ProjectStatsCondition {
            project_ids: vec![id.to_string()],
        });
        let request = QueryRequest::new(condition)
            .with_order_by(order_by)
            .with_pagination(pagination);

        self.post_json(GET_PROJECT_STATS, &request).await
    }
}
