//! Exact on-chain amounts
//!
//! The marketplace API reports prices and fees sometimes as JSON strings and
//! sometimes as JSON numbers. [`Amount`] accepts both and always carries an
//! exact unsigned integer, so sums like `price + fees` never lose precision.

use ethers::types::U256;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// 1 AVAX = 10^9 nAVAX = 10^18 wei
const WEI_PER_NAVAX: u64 = 1_000_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount '{0}': expected unsigned integer digits")]
    InvalidDigits(String),

    #[error("Amount {0} does not fit in 256 bits")]
    Overflow(String),

    #[error("Unsupported amount representation: {0}")]
    UnsupportedType(String),
}

pub type Result<T> = std::result::Result<T, AmountError>;

/// Non-negative arbitrary-precision integer amount (wei, nAVAX or token units)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Parse a decimal digit string (surrounding whitespace is ignored)
    pub fn parse(raw: &str) -> Result<Self> {
        let digits = raw.trim();
        if digits.is_empty() {
            return Err(AmountError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidDigits(digits.to_string()));
        }

        BigUint::parse_bytes(digits.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| AmountError::InvalidDigits(digits.to_string()))
    }

    /// Scale an nAVAX amount to wei
    pub fn navax_to_wei(&self) -> Self {
        Self(self.0.clone() * WEI_PER_NAVAX)
    }

    /// Convert to an EVM word, failing when the value needs more than 256 bits
    pub fn to_u256(&self) -> Result<U256> {
        if self.0.bits() > 256 {
            return Err(AmountError::Overflow(self.to_string()));
        }
        Ok(U256::from_big_endian(&self.0.to_bytes_be()))
    }

    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Self::parse(&n.to_string()),
            other => Err(AmountError::UnsupportedType(other.to_string())),
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(self.0 + &rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, amount| acc + amount)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // arbitrary_precision keeps every digit of the number
        let number = serde_json::Number::from_str(&self.0.to_string()).map_err(S::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Amount::from_json(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_and_number() {
        let from_string: Amount = serde_json::from_str("\"1000\"").unwrap();
        let from_number: Amount = serde_json::from_str("1000").unwrap();

        assert_eq!(from_string, from_number);
        assert_eq!(from_string, Amount::from(1000u64));
    }

    #[test]
    fn test_large_number_is_exact() {
        let raw = "123456789012345678901234567890123456789";
        let amount: Amount = serde_json::from_str(raw).unwrap();
        assert_eq!(amount.to_string(), raw);
    }

    #[test]
    fn test_rejects_non_integers() {
        assert!(serde_json::from_str::<Amount>("\"-5\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"1.5\"").is_err());
        assert!(serde_json::from_str::<Amount>("1.5").is_err());
        assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Amount>("null").is_err());
        assert_eq!(Amount::parse("  "), Err(AmountError::Empty));
    }

    #[test]
    fn test_sum_price_and_fees() {
        let price = Amount::parse("1000").unwrap();
        let fees = vec![Amount::parse("50").unwrap(), Amount::parse("25").unwrap()];

        let total = fees.iter().sum::<Amount>() + price;
        assert_eq!(total, Amount::from(1075u64));
        assert_eq!(total.to_u256().unwrap(), U256::from(1075u64));
    }

    #[test]
    fn test_sum_of_no_fees_is_zero() {
        let fees: Vec<Amount> = Vec::new();
        assert_eq!(fees.iter().sum::<Amount>(), Amount::zero());
        assert_eq!(Amount::zero(), Amount::from(0u64));
    }

    #[test]
    fn test_navax_to_wei() {
        let navax = Amount::from(2u64);
        assert_eq!(navax.navax_to_wei(), Amount::from(2_000_000_000u64));
    }

    #[test]
    fn test_u256_overflow() {
        let max = Amount::parse(&U256::MAX.to_string()).unwrap();
        assert_eq!(max.to_u256().unwrap(), U256::MAX);

        let too_big = max + Amount::from(1u64);
        assert!(matches!(too_big.to_u256(), Err(AmountError::Overflow(_))));
    }

    #[test]
    fn test_serializes_as_number() {
        let amount = Amount::parse("1075").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "1075");
    }
}
