//! Domain Layer
//!
//! Transport-independent value types shared by the query and trade clients.

pub mod amount;
pub mod outcome;
pub mod token;

pub use amount::{Amount, AmountError};
pub use outcome::TradeOutcome;
pub use token::TokenAddress;
