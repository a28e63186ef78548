//! Query command runner
//!
//! Maps `hyperspace <command> [args]` onto the query client.

use anyhow::{anyhow, bail, Context, Result};
use hyperspace::{ActionType, ListingSortField, OrderBy, PaginationInfo, QueryClient, QueryResponse};

pub const USAGE: &str = "\
Usage: hyperspace <command> [args] [--page N] [--size N] [--config PATH]

Commands:
  owned <owner> [collection]           Tokens held by a wallet
  listings <collection>                Active listings, cheapest first
  user-listings <owner> [collection]   Active listings of a wallet
  bids <collection>                    Collection bids
  user-bids <collection> <wallet>      Collection bids of a wallet
  activity <collection> [TYPES]        Collection activity (TYPES: LISTING,BID,...)
  user-activity <owner> [TYPES]        Wallet activity
  stats [collection]                   Collection stats, all collections if omitted";

/// One read query parsed from the command line
#[derive(Debug, Clone, PartialEq)]
pub enum QueryCommand {
    Owned { owner: String, collection: Option<String> },
    Listings { collection: String },
    UserListings { owner: String, collection: Option<String> },
    Bids { collection: String },
    UserBids { collection: String, wallet: String },
    Activity { collection: String, action_types: Option<Vec<ActionType>> },
    UserActivity { owner: String, action_types: Option<Vec<ActionType>> },
    Stats { collection: Option<String> },
}

/// Parsed command plus pagination flags
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: QueryCommand,
    pub pagination: Option<PaginationInfo>,
}

impl QueryCommand {
    /// Parse arguments (program name excluded)
    pub fn parse(args: &[String]) -> Result<Invocation> {
        let mut positional = Vec::new();
        let mut page = None;
        let mut size = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--page" => page = Some(flag_value(iter.next(), "--page")?),
                "--size" => size = Some(flag_value(iter.next(), "--size")?),
                _ => positional.push(arg.as_str()),
            }
        }

        let pagination = match (page, size) {
            (None, None) => None,
            (page, size) => Some(PaginationInfo {
                page_number: page,
                page_size: size,
                ..Default::default()
            }),
        };

        let (name, rest) = positional.split_first().ok_or_else(|| anyhow!("missing command"))?;
        let arg = |i: usize, what: &str| -> Result<String> {
            rest.get(i)
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!("{} requires <{}>", name, what))
        };
        let opt = |i: usize| rest.get(i).map(|s| s.to_string());

        let command = match *name {
            "owned" => QueryCommand::Owned { owner: arg(0, "owner")?, collection: opt(1) },
            "listings" => QueryCommand::Listings { collection: arg(0, "collection")? },
            "user-listings" => QueryCommand::UserListings { owner: arg(0, "owner")?, collection: opt(1) },
            "bids" => QueryCommand::Bids { collection: arg(0, "collection")? },
            "user-bids" => QueryCommand::UserBids {
                collection: arg(0, "collection")?,
                wallet: arg(1, "wallet")?,
            },
            "activity" => QueryCommand::Activity {
                collection: arg(0, "collection")?,
                action_types: opt(1).map(|s| parse_action_types(&s)).transpose()?,
            },
            "user-activity" => QueryCommand::UserActivity {
                owner: arg(0, "owner")?,
                action_types: opt(1).map(|s| parse_action_types(&s)).transpose()?,
            },
            "stats" => QueryCommand::Stats { collection: opt(0) },
            other => bail!("unknown command: {}", other),
        };

        Ok(Invocation { command, pagination })
    }

    /// Run the query against `client`
    pub async fn run(&self, client: &QueryClient, pagination: Option<PaginationInfo>) -> Result<QueryResponse> {
        let response = match self {
            QueryCommand::Owned { owner, collection } => {
                client.get_user_owned_nfts(owner, collection.as_deref(), pagination).await?
            }
            QueryCommand::Listings { collection } => {
                client
                    .get_collection_listings(
                        collection,
                        Some(vec![OrderBy::asc(ListingSortField::Price)]),
                        pagination,
                    )
                    .await?
            }
            QueryCommand::UserListings { owner, collection } => {
                client.get_user_listings(owner, collection.as_deref(), pagination).await?
            }
            QueryCommand::Bids { collection } => client.get_collection_bids(collection, pagination).await?,
            QueryCommand::UserBids { collection, wallet } => {
                client.get_user_collection_bids(collection, wallet, pagination).await?
            }
            QueryCommand::Activity { collection, action_types } => {
                client
                    .get_collection_activity(collection, action_types.clone(), pagination)
                    .await?
            }
            QueryCommand::UserActivity { owner, action_types } => {
                client.get_user_activity(owner, action_types.clone(), pagination).await?
            }
            QueryCommand::Stats { collection } => {
                client.get_collection_stats(collection.as_deref(), None, pagination).await?
            }
        };
        Ok(response)
    }
}

fn flag_value(value: Option<&String>, flag: &str) -> Result<u32> {
    value
        .ok_or_else(|| anyhow!("{} requires a value", flag))?
        .parse()
        .with_context(|| format!("{} must be a positive number", flag))
}

/// Comma-separated action types, e.g. `listing,accept_bid`
fn parse_action_types(raw: &str) -> Result<Vec<ActionType>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            let name = s.trim().to_uppercase().replace('-', "_");
            serde_json::from_value(serde_json::Value::String(name))
                .with_context(|| format!("unknown action type: {}", s.trim()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        let parsed = QueryCommand::parse(&args(&["user-bids", "0xc", "0xw"])).unwrap();
        assert_eq!(
            parsed.command,
            QueryCommand::UserBids { collection: "0xc".to_string(), wallet: "0xw".to_string() }
        );
        assert!(parsed.pagination.is_none());

        let parsed = QueryCommand::parse(&args(&["stats"])).unwrap();
        assert_eq!(parsed.command, QueryCommand::Stats { collection: None });
    }

    #[test]
    fn test_parse_pagination_flags() {
        let parsed = QueryCommand::parse(&args(&["listings", "--page", "2", "0xc", "--size", "10"])).unwrap();
        assert_eq!(parsed.command, QueryCommand::Listings { collection: "0xc".to_string() });
        assert_eq!(parsed.pagination, Some(PaginationInfo::page(2, 10)));
    }

    #[test]
    fn test_parse_action_types() {
        let parsed = QueryCommand::parse(&args(&["activity", "0xc", "listing,accept-bid"])).unwrap();
        assert_eq!(
            parsed.command,
            QueryCommand::Activity {
                collection: "0xc".to_string(),
                action_types: Some(vec![ActionType::Listing, ActionType::AcceptBid]),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(QueryCommand::parse(&[]).is_err());
        assert!(QueryCommand::parse(&args(&["bids"])).is_err());
        assert!(QueryCommand::parse(&args(&["unknown"])).is_err());
        assert!(QueryCommand::parse(&args(&["activity", "0xc", "nope"])).is_err());
        assert!(QueryCommand::parse(&args(&["stats", "--page", "x"])).is_err());
    }
}
