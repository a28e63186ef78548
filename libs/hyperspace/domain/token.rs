//! NFT token identifiers
//!
//! The marketplace addresses a single NFT as `"<contract>_<token id>"`.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAddress {
    contract: String,
    token_id: String,
}

impl TokenAddress {
    pub fn new(contract: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            token_id: token_id.into(),
        }
    }

    /// Split a wire identifier on its last underscore
    pub fn parse(raw: &str) -> Option<Self> {
        let (contract, token_id) = raw.rsplit_once('_')?;
        if contract.is_empty() || token_id.is_empty() {
            return None;
        }
        Some(Self::new(contract, token_id))
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.contract, self.token_id)
    }
}

impl Serialize for TokenAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
