//! Trade client: approval, remote build, local signing and submission

use super::super::approval::{ensure_collection_approval, ensure_erc20_allowance, ApprovalError};
use super::super::constants::*;
use super::super::query::{QueryClient, QueryError, QueryResponse};
use super::super::wallet::{EthersWallet, MarketplaceWallet, WalletError};
use super::types::*;
use crate::domain::{Amount, AmountError, TokenAddress, TradeOutcome};
use ethers::signers::LocalWallet;
use ethers::types::{Address, TransactionRequest, TxHash, U256, U64};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Approval failed: {0}")]
    ApprovalFailed(#[from] ApprovalError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("{endpoint} returned no transaction")]
    EmptyBuildResponse { endpoint: String },

    #[error("{endpoint} response has no usable {field}")]
    MissingPayload { endpoint: String, field: &'static str },

    #[error("Invalid listing metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid transaction bytes: {0}")]
    InvalidTransactionBytes(String),

    #[error("Signed order is not valid JSON: {0}")]
    InvalidSignedOrder(String),

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Transaction dropped without receipt")]
    NoReceipt,
}

pub type Result<T> = std::result::Result<T, TradeError>;

/// Write operations bound to one wallet, one provider and one API key
pub struct TradeClient<W: MarketplaceWallet = EthersWallet> {
    query: QueryClient,
    wallet: W,
    contracts: MarketplaceContracts,
}

impl TradeClient<EthersWallet> {
    /// Connect `wallet` to `rpc_url` and bind it to `api_key`
    pub fn new(api_key: impl Into<String>, wallet: LocalWallet, rpc_url: &str) -> Result<Self> {
        let wallet = EthersWallet::new(wallet, rpc_url)?;
        Ok(Self::with_wallet(api_key, wallet))
    }
}

impl<W: MarketplaceWallet> TradeClient<W> {
    /// Bind any [`MarketplaceWallet`] implementation
    pub fn with_wallet(api_key: impl Into<String>, wallet: W) -> Self {
        Self {
            query: QueryClient::new(api_key),
            wallet,
            contracts: MarketplaceContracts::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.query = self.query.with_base_url(base_url);
        self
    }

    pub fn with_contracts(mut self, contracts: MarketplaceContracts) -> Self {
        self.contracts = contracts;
        self
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    pub fn contracts(&self) -> &MarketplaceContracts {
        &self.contracts
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// WAVAX held by the bound wallet, in wei
    pub async fn wavax_balance(&self) -> Result<U256> {
        Ok(self
            .wallet
            .erc20_balance(self.contracts.wavax, self.address())
            .await?)
    }

    // =========================================================================
    // Signed-order operations
    // =========================================================================

    /// Place a collection-wide bid of `price_in_navax`
    ///
    /// Ensures the exchange may spend the bid amount of WAVAX first.
    pub async fn create_collection_bid(
        &self,
        contract: &str,
        price_in_navax: Amount,
    ) -> Result<TradeOutcome> {
        let required = price_in_navax.navax_to_wei().to_u256()?;
        ensure_erc20_allowance(&self.wallet, self.contracts.wavax, self.contracts.exchange, required)
            .await?;

        let condition = TradeCondition {
            buyer_address: Some(self.wallet_address()),
            contract_address: Some(contract.to_string()),
            price: price_in_navax,
            ..Default::default()
        };

        info!("Creating collection bid on {}", contract);
        self.sign_and_register(CREATE_COLLECTION_BID_TX, &condition)
            .await
    }

    /// List one token for sale at `price`
    pub async fn list_nft(&self, contract: &str, token_id: &str, price: Amount) -> Result<TradeOutcome> {
        self.ensure_collection_approved(contract).await?;

        let condition = TradeCondition {
            seller_address: Some(self.wallet_address()),
            token_address: Some(TokenAddress::new(contract, token_id)),
            price,
            ..Default::default()
        };

        info!("Listing {}_{}", contract, token_id);
        self.sign_and_register(CREATE_LIST_TX, &condition).await
    }

    // =========================================================================
    // Broadcast operations
    // =========================================================================

    /// Buy a listed token, paying the listed amount plus fees
    pub async fn buy_nft(
        &self,
        contract: &str,
        token_id: &str,
        price: Amount,
        metadata: Value,
    ) -> Result<TradeOutcome> {
        let condition = TradeCondition {
            buyer_address: Some(self.wallet_address()),
            token_address: Some(TokenAddress::new(contract, token_id)),
            price,
            metadata: Some(metadata.clone()),
            ..Default::default()
        };

        info!("Buying {}_{}", contract, token_id);
        let result = self.try_buy(&condition, &metadata).await;
        Ok(into_outcome(CREATE_BUY_TX, result))
    }

    /// Sell a token into an existing collection bid
    pub async fn accept_collection_bid(
        &self,
        contract: &str,
        token_id: &str,
        price: Amount,
        metadata: Value,
    ) -> Result<TradeOutcome> {
        self.ensure_collection_approved(contract).await?;

        let condition = TradeCondition {
            seller_address: Some(self.wallet_address()),
            token_address: Some(TokenAddress::new(contract, token_id)),
            price,
            metadata: Some(metadata),
            ..Default::default()
        };

        info!("Accepting collection bid for {}_{}", contract, token_id);
        let result = self
            .try_broadcast(CREATE_ACCEPT_COLLECTION_BID_TX, &condition, None)
            .await;
        Ok(into_outcome(CREATE_ACCEPT_COLLECTION_BID_TX, result))
    }

    /// Remove an active listing
    pub async fn delist_nft(
        &self,
        contract: &str,
        token_id: &str,
        price: Amount,
        metadata: Value,
    ) -> Result<TradeOutcome> {
        self.ensure_collection_approved(contract).await?;

        let condition = TradeCondition {
            seller_address: Some(self.wallet_address()),
            token_address: Some(TokenAddress::new(contract, token_id)),
            price,
            metadata: Some(metadata),
            ..Default::default()
        };

        info!("Delisting {}_{}", contract, token_id);
        let result = self.try_broadcast(CREATE_DELIST_TX, &condition, None).await;
        Ok(into_outcome(CREATE_DELIST_TX, result))
    }

    /// Cancel one of the wallet's collection bids
    pub async fn cancel_collection_bid(&self, price: Amount, metadata: Value) -> Result<TradeOutcome> {
        let condition = TradeCondition {
            buyer_address: Some(self.wallet_address()),
            price,
            metadata: Some(metadata),
            ..Default::default()
        };

        info!("Cancelling collection bid");
        let result = self
            .try_broadcast(CREATE_CANCEL_COLLECTION_BID_TX, &condition, None)
            .await;
        Ok(into_outcome(CREATE_CANCEL_COLLECTION_BID_TX, result))
    }

    /// Register a signed order with the marketplace
    pub async fn validate_signature(&self, order: Value) -> Result<QueryResponse> {
        let request = ValidateSignatureRequest {
            condition: ValidateSignatureCondition { order },
        };
        Ok(self.query.post_json(VALIDATE_SIGNATURE, &request).await?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn wallet_address(&self) -> String {
        format!("{:?}", self.wallet.address())
    }

    async fn ensure_collection_approved(&self, contract: &str) -> Result<()> {
        let nft = Address::from_str(contract)
            .map_err(|_| TradeError::InvalidAddress(contract.to_string()))?;
        ensure_collection_approval(&self.wallet, nft, self.contracts.exchange).await?;
        Ok(())
    }

    /// POST the condition to a build endpoint and return the first envelope
    async fn build_transaction(&self, endpoint: &str, condition: &TradeCondition) -> Result<TxEnvelope> {
        let response = self
            .query
            .post_json(endpoint, &BuildRequest { condition })
            .await?;

        let first = match response.data {
            Value::Array(items) => items.into_iter().next(),
            _ => None,
        }
        .ok_or_else(|| TradeError::EmptyBuildResponse {
            endpoint: endpoint.to_string(),
        })?;

        serde_json::from_value(first).map_err(|e| {
            TradeError::Query(QueryError::DeserializeFailed(format!(
                "{} envelope: {}",
                endpoint, e
            )))
        })
    }

    async fn sign_and_register(&self, endpoint: &str, condition: &TradeCondition) -> Result<TradeOutcome> {
        let result = self.try_sign_and_register(endpoint, condition).await;
        Ok(into_outcome(endpoint, result))
    }

    async fn try_sign_and_register(
        &self,
        endpoint: &str,
        condition: &TradeCondition,
    ) -> Result<TradeOutcome> {
        let envelope = self.build_transaction(endpoint, condition).await?;
        let metadata = envelope
            .usable_metadata()
            .ok_or_else(|| TradeError::MissingPayload {
                endpoint: endpoint.to_string(),
                field: "metadata",
            })?;

        let signed = self.wallet.sign_order(metadata).await?;
        let order: Value =
            serde_json::from_str(&signed).map_err(|e| TradeError::InvalidSignedOrder(e.to_string()))?;

        let response = self.validate_signature(order).await?;
        info!("Order registered via {} ({})", endpoint, response.status);

        Ok(TradeOutcome::validated(response.data))
    }

    async fn try_buy(&self, condition: &TradeCondition, metadata: &Value) -> Result<TradeOutcome> {
        let value = ListingMetadata::from_value(metadata)
            .map_err(|e| TradeError::InvalidMetadata(e.to_string()))?
            .total_payment()
            .to_u256()?;
        debug!("Buy value: {} wei", value);

        self.try_broadcast(CREATE_BUY_TX, condition, Some(value)).await
    }

    async fn try_broadcast(
        &self,
        endpoint: &str,
        condition: &TradeCondition,
        value: Option<U256>,
    ) -> Result<TradeOutcome> {
        let envelope = self.build_transaction(endpoint, condition).await?;
        let data = envelope
            .transaction_bytes()
            .ok_or_else(|| TradeError::MissingPayload {
                endpoint: endpoint.to_string(),
                field: "byte_string",
            })?
            .map_err(TradeError::InvalidTransactionBytes)?;

        let mut tx = TransactionRequest::new()
            .to(envelope.to.unwrap_or(self.contracts.exchange))
            .data(data);
        if let Some(value) = value {
            tx = tx.value(value);
        }

        let raw = self.wallet.sign_transaction(tx).await?;
        let receipt = self
            .wallet
            .send_signed(raw)
            .await?
            .ok_or(TradeError::NoReceipt)?;

        let hash = format!("{:?}", receipt.transaction_hash);
        if receipt.status != Some(U64::from(1)) || receipt.transaction_hash == TxHash::zero() {
            return Err(TradeError::Reverted(hash));
        }

        info!("Transaction confirmed: {}", hash);
        Ok(TradeOutcome::confirmed(hash))
    }
}

/// Normalize a transactional-phase failure into a failed outcome
fn into_outcome(endpoint: &str, result: Result<TradeOutcome>) -> TradeOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{} failed: {}", endpoint, e);
            TradeOutcome::failed(e.to_string())
        }
    }
}
