//! Request and response types for the read endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Filters
// =============================================================================

/// Marketplace event kinds used to filter activity feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Listing,
    Delisting,
    UpdateListing,
    Transaction,
    Bid,
    CancelBid,
    AcceptBid,
}

// =============================================================================
// Ordering
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sortable columns of `get-collection-view`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingSortField {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "rank_est")]
    RankEst,
    #[serde(rename = "block_timestamp")]
    BlockTimestamp,
    #[serde(rename = "last_sale_price")]
    LastSalePrice,
}

/// Sortable columns of `get-project-stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsSortField {
    #[serde(rename = "volume_1hr")]
    Volume1Hour,
    #[serde(rename = "volume_1day")]
    Volume1Day,
    #[serde(rename = "volume_7day")]
    Volume7Day,
    #[serde(rename = "floor_price")]
    FloorPrice,
    #[serde(rename = "market_cap")]
    MarketCap,
    #[serde(rename = "num_of_token_listed")]
    NumListed,
    #[serde(rename = "num_of_token_holders")]
    NumHolders,
}

/// Endpoints without an order-by allow-list use this uninhabited column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unsortable {}

/// One `(column, direction)` pair; the column type is the endpoint's allow-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy<F> {
    pub field_name: F,
    pub sort_order: SortOrder,
}

impl<F> OrderBy<F> {
    pub fn asc(field_name: F) -> Self {
        Self {
            field_name,
            sort_order: SortOrder::Asc,
        }
    }

    pub fn desc(field_name: F) -> Self {
        Self {
            field_name,
            sort_order: SortOrder::Desc,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination forwarded verbatim to the API
///
/// Unknown members go in `extra` and are flattened into the same object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressive_load: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaginationInfo {
    pub fn page(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
            ..Default::default()
        }
    }
}

// =============================================================================
// Conditions
// =============================================================================

/// `get-marketplace-snapshots`: tokens held by a wallet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedNftsCondition {
    pub owner_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

/// Single-collection filter (`get-collection-bids-for-project`, `get-collection-view`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionCondition {
    pub contract_address: String,
}

/// `get-collection-bids-for-project-and-user`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCollectionBidsCondition {
    pub contract_address: String,
    pub buyer_address: String,
}

/// `get-marketplace-snapshot`: a wallet's active normal listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserListingsCondition {
    pub owner_address: String,
    pub listing_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

/// `get-collection-activity`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionActivityCondition {
    pub contract_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_types: Option<Vec<ActionType>>,
}

/// `get-user-activity`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserActivityCondition {
    pub owner_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_types: Option<Vec<ActionType>>,
}

/// `get-project-stats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStatsCondition {
    pub project_ids: Vec<String>,
}

// =============================================================================
// Envelope
// =============================================================================

/// Body of every read request: `{ condition?, order_by?, pagination_info? }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest<C, F = Unsortable> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<C>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderBy<F>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_info: Option<PaginationInfo>,
}

impl<C, F> QueryRequest<C, F> {
    pub fn new(condition: Option<C>) -> Self {
        Self {
            condition,
            order_by: None,
            pagination_info: None,
        }
    }

    /// An empty list is dropped rather than sent as `[]`
    pub fn with_order_by(mut self, order_by: Option<Vec<OrderBy<F>>>) -> Self {
        self.order_by = order_by.filter(|o| !o.is_empty());
        self
    }

    pub fn with_pagination(mut self, pagination_info: Option<PaginationInfo>) -> Self {
        self.pagination_info = pagination_info;
        self
    }
}

/// Successful API response: HTTP status plus parsed JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: u16,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_members_omitted() {
        let request: QueryRequest<OwnedNftsCondition> = QueryRequest::new(Some(OwnedNftsCondition {
            owner_address: "0x1".to_string(),
            contract_address: None,
        }));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "condition": { "owner_address": "0x1" } })
        );
    }

    #[test]
    fn test_order_by_and_pagination() {
        let request = QueryRequest::new(Some(CollectionCondition {
            contract_address: "0xC".to_string(),
        }))
        .with_order_by(Some(vec![OrderBy::asc(ListingSortField::Price)]))
        .with_pagination(Some(PaginationInfo::page(2, 50)));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "condition": { "contract_address": "0xC" },
                "order_by": [{ "field_name": "price", "sort_order": "ASC" }],
                "pagination_info": { "page_number": 2, "page_size": 50 }
            })
        );
    }

    #[test]
    fn test_empty_order_by_dropped() {
        let request: QueryRequest<ProjectStatsCondition, StatsSortField> =
            QueryRequest::new(None).with_order_by(Some(Vec::new()));
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }

    #[test]
    fn test_pagination_extra_members_forwarded() {
        let pagination: PaginationInfo =
            serde_json::from_value(json!({ "page_size": 10, "cursor": "abc" })).unwrap();
        assert_eq!(pagination.page_size, Some(10));
        assert_eq!(
            serde_json::to_value(&pagination).unwrap(),
            json!({ "page_size": 10, "cursor": "abc" })
        );
    }

    #[test]
    fn test_action_type_wire_names() {
        assert_eq!(
            serde_json::to_value(vec![ActionType::UpdateListing, ActionType::CancelBid]).unwrap(),
            json!(["UPDATE_LISTING", "CANCEL_BID"])
        );
    }

    #[test]
    fn test_stats_sort_field_wire_names() {
        assert_eq!(
            serde_json::to_value(OrderBy::desc(StatsSortField::Volume1Day)).unwrap(),
            json!({ "field_name": "volume_1day", "sort_order": "DESC" })
        );
    }
}
