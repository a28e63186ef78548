//! Structured result of a marketplace write operation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a trade once the transactional phase has started.
///
/// `digest` and `errors` are never both set. `validation` carries the
/// `validate-signature` response for operations that register a signed order
/// instead of broadcasting a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub digest: Option<String>,
    pub errors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Value>,
}

impl TradeOutcome {
    /// Transaction included on chain with the given hash
    pub fn confirmed(digest: impl Into<String>) -> Self {
        Self {
            digest: Some(digest.into()),
            errors: None,
            validation: None,
        }
    }

    /// Signed order accepted for indexing
    pub fn validated(response: Value) -> Self {
        Self {
            digest: None,
            errors: None,
            validation: Some(response),
        }
    }

    pub fn failed(errors: impl Into<String>) -> Self {
        Self {
            digest: None,
            errors: Some(errors.into()),
            validation: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_none()
    }
}
