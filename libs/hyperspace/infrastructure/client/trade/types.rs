//! Trade request/response types

use super::super::constants::{EXCHANGE_PROXY, WAVAX_ADDRESS};
use crate::domain::{Amount, TokenAddress};
use ethers::types::{Address, Bytes};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

// =============================================================================
// Contracts
// =============================================================================

/// On-chain addresses the trade flow interacts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceContracts {
    /// Exchange proxy: approval operator/spender and default transaction target
    pub exchange: Address,
    /// Wrapped native token used to fund collection bids
    pub wavax: Address,
}

impl Default for MarketplaceContracts {
    fn default() -> Self {
        Self {
            exchange: static_address(EXCHANGE_PROXY),
            wavax: static_address(WAVAX_ADDRESS),
        }
    }
}

fn static_address(raw: &str) -> Address {
    Address::from_str(raw).expect("hard-coded contract address is valid")
}

// =============================================================================
// Build Requests
// =============================================================================

/// Condition sent to the `create-*-tx` endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradeCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<TokenAddress>,

    pub price: Amount,

    /// Listing/bid metadata previously returned by the read endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildRequest<'a> {
    pub condition: &'a TradeCondition,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateSignatureCondition {
    pub order: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateSignatureRequest {
    pub condition: ValidateSignatureCondition,
}

// =============================================================================
// Transaction Envelope
// =============================================================================

/// First element of a `create-*-tx` response
///
/// Carries either signable order `metadata` or encoded calldata in `byte_string`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxEnvelope {
    #[serde(default)]
    pub metadata: Option<Value>,

    #[serde(default)]
    pub byte_string: Option<String>,

    /// Overrides the exchange as transaction target when present
    #[serde(default)]
    pub to: Option<Address>,
}

impl TxEnvelope {
    /// Signable payload, ignoring `null` and empty objects
    pub fn usable_metadata(&self) -> Option<&Value> {
        self.metadata.as_ref().filter(|m| match m {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        })
    }

    /// Decoded calldata; `None` when absent or blank
    pub fn transaction_bytes(&self) -> Option<Result<Bytes, String>> {
        let raw = self.byte_string.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Bytes::from_str(raw).map_err(|e| format!("invalid byte_string: {}", e)))
    }
}

// =============================================================================
// Listing Metadata
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Fee {
    pub amount: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingEventLog {
    #[serde(rename = "erc20TokenAmount")]
    pub erc20_token_amount: Amount,

    #[serde(default)]
    pub fees: Vec<Fee>,
}

/// Fields of a listing's metadata needed to pay for it
#[derive(Debug, Clone, Deserialize)]
pub struct ListingMetadata {
    pub event_log: ListingEventLog,
}

impl ListingMetadata {
    pub fn from_value(metadata: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(metadata.clone())
    }

    /// Listed token amount plus every fee, computed exactly
    pub fn total_payment(&self) -> Amount {
        let fees: Amount = self.event_log.fees.iter().map(|f| &f.amount).sum();
        fees + &self.event_log.erc20_token_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_payment_is_exact() {
        let metadata = json!({
            "event_log": {
                "erc20TokenAmount": "1000",
                "fees": [{ "amount": "50" }, { "amount": "25" }]
            }
        });

        let listing = ListingMetadata::from_value(&metadata).unwrap();
        assert_eq!(listing.total_payment(), Amount::from(1075u64));
    }

    #[test]
    fn test_total_payment_mixed_representations() {
        let metadata = json!({
            "event_log": {
                "erc20TokenAmount": 1000000000000000000u64,
                "fees": [{ "amount": "25000000000000000", "recipient": "0x1" }]
            },
            "other": true
        });

        let listing = ListingMetadata::from_value(&metadata).unwrap();
        assert_eq!(listing.total_payment().to_string(), "1025000000000000000");
    }

    #[test]
    fn test_total_payment_without_fees() {
        let metadata = json!({ "event_log": { "erc20TokenAmount": "7" } });
        let listing = ListingMetadata::from_value(&metadata).unwrap();
        assert_eq!(listing.total_payment(), Amount::from(7u64));
    }

    #[test]
    fn test_missing_event_log_rejected() {
        assert!(ListingMetadata::from_value(&json!({ "fees": [] })).is_err());
    }

    #[test]
    fn test_envelope_payloads() {
        let envelope: TxEnvelope =
            serde_json::from_value(json!({ "metadata": null, "byte_string": "0x0102" })).unwrap();
        assert!(envelope.usable_metadata().is_none());
        assert_eq!(
            envelope.transaction_bytes().unwrap().unwrap(),
            Bytes::from(vec![1u8, 2])
        );

        let envelope: TxEnvelope = serde_json::from_value(json!({ "metadata": {} })).unwrap();
        assert!(envelope.usable_metadata().is_none());
        assert!(envelope.transaction_bytes().is_none());

        let envelope: TxEnvelope = serde_json::from_value(json!({ "byte_string": "0xzz" })).unwrap();
        assert!(envelope.transaction_bytes().unwrap().is_err());
    }

    #[test]
    fn test_condition_serialization() {
        let condition = TradeCondition {
            seller_address: Some("0xseller".to_string()),
            token_address: Some(TokenAddress::new("0xAA", "7")),
            price: Amount::from(100u64),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(BuildRequest { condition: &condition }).unwrap(),
            json!({
                "condition": {
                    "seller_address": "0xseller",
                    "token_address": "0xAA_7",
                    "price": 100
                }
            })
        );
    }

    #[test]
    fn test_default_contracts() {
        let contracts = MarketplaceContracts::default();
        assert_ne!(contracts.exchange, contracts.wavax);
    }
}
