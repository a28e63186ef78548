//! Common test utilities for Hyperspace integration tests
//!
//! Provides an in-memory wallet that records what it signs, plus fixtures
//! shared by the query and trade client tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ethers::types::{
    Address, Bytes, NameOrAddress, TransactionReceipt, TransactionRequest, H256, U256, U64,
};
use hyperspace::{MarketplaceContracts, MarketplaceWallet, WalletError};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

pub const API_KEY: &str = "test-api-key";

/// Wallet double driven by flags
///
/// `sign_transaction` returns the index of the recorded request as the raw
/// bytes so `send_signed` can find it again. Receipts for transactions sent
/// to the exchange use `trade_status`, everything else `approval_status`.
pub struct MockWallet {
    pub address: Address,
    pub exchange: Address,
    pub allowance: U256,
    pub approved_for_all: bool,
    pub fail_signing: bool,
    pub drop_receipt: bool,
    pub trade_status: u64,
    pub approval_status: u64,
    transactions: Mutex<Vec<TransactionRequest>>,
    orders: Mutex<Vec<Value>>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            address: Address::from_low_u64_be(0xabc),
            exchange: MarketplaceContracts::default().exchange,
            allowance: U256::MAX,
            approved_for_all: true,
            fail_signing: false,
            drop_receipt: false,
            trade_status: 1,
            approval_status: 1,
            transactions: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn address_hex(&self) -> String {
        format!("{:?}", self.address)
    }

    /// Every transaction handed to `sign_transaction`, in order
    pub fn transactions(&self) -> Vec<TransactionRequest> {
        self.transactions.lock().clone()
    }

    /// Every payload handed to `sign_order`, in order
    pub fn signed_orders(&self) -> Vec<Value> {
        self.orders.lock().clone()
    }

    fn receipt_for(&self, index: usize) -> TransactionReceipt {
        let transactions = self.transactions.lock();
        let tx = &transactions[index];

        let status = if tx.to == Some(NameOrAddress::Address(self.exchange)) {
            self.trade_status
        } else {
            self.approval_status
        };

        TransactionReceipt {
            transaction_hash: receipt_hash(index),
            status: Some(U64::from(status)),
            ..Default::default()
        }
    }
}

/// Hash reported for the `index`-th signed transaction
pub fn receipt_hash(index: usize) -> H256 {
    H256::from_low_u64_be(index as u64 + 1)
}

#[async_trait]
impl MarketplaceWallet for MockWallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn erc20_allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> Result<U256, WalletError> {
        Ok(self.allowance)
    }

    async fn erc20_balance(&self, _token: Address, _owner: Address) -> Result<U256, WalletError> {
        Ok(U256::from(5u64) * U256::exp10(18))
    }

    async fn is_approved_for_all(
        &self,
        _nft: Address,
        _owner: Address,
        _operator: Address,
    ) -> Result<bool, WalletError> {
        Ok(self.approved_for_all)
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, WalletError> {
        if self.fail_signing {
            return Err(WalletError::Signing("device locked".to_string()));
        }

        let mut transactions = self.transactions.lock();
        transactions.push(tx);
        Ok(Bytes::from(vec![(transactions.len() - 1) as u8]))
    }

    async fn send_signed(&self, raw: Bytes) -> Result<Option<TransactionReceipt>, WalletError> {
        if self.drop_receipt {
            return Ok(None);
        }
        Ok(Some(self.receipt_for(raw[0] as usize)))
    }

    async fn sign_order(&self, payload: &Value) -> Result<String, WalletError> {
        if self.fail_signing {
            return Err(WalletError::Signing("device locked".to_string()));
        }

        self.orders.lock().push(payload.clone());

        let mut order = payload
            .get("message")
            .cloned()
            .ok_or_else(|| WalletError::InvalidPayload("missing message".to_string()))?;
        order["signature"] = json!({ "signatureType": 2, "v": 27, "r": "0x01", "s": "0x02" });

        Ok(order.to_string())
    }
}

pub mod fixtures {
    //! Test fixtures for marketplace payloads

    use serde_json::{json, Value};

    pub const COLLECTION: &str = "0x1000000000000000000000000000000000000001";

    /// Typed-data order as returned in `metadata` by the build endpoints
    pub fn order_metadata(maker: &str) -> Value {
        json!({
            "types": {
                "ERC721Order": [
                    { "name": "maker", "type": "address" },
                    { "name": "erc20TokenAmount", "type": "uint256" }
                ]
            },
            "primaryType": "ERC721Order",
            "domain": { "name": "ZeroEx", "chainId": "43114" },
            "message": { "maker": maker, "erc20TokenAmount": "100" }
        })
    }

    /// Listing metadata with a 1000 token amount and two fees
    pub fn listing_metadata() -> Value {
        json!({
            "event_log": {
                "erc20TokenAmount": "1000",
                "fees": [{ "amount": "50" }, { "amount": "25" }]
            }
        })
    }
}
