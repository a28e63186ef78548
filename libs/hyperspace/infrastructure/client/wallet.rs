//! Wallet capability used by the trade client
//!
//! [`MarketplaceWallet`] is the narrow surface the trade flow needs from a
//! blockchain client: on-chain reads for approval state, local transaction
//! signing, raw broadcast and EIP-712 order signing. [`EthersWallet`] backs it
//! with an `ethers` HTTP provider and a local private key.

use super::constants::{AVALANCHE_CHAIN_ID, AVALANCHE_RPC_URL};
use super::contracts::{IERC20, IERC721};
use async_trait::async_trait;
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::transaction::eip712::TypedData;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// EIP-712 signature type tag in signed marketplace orders
const SIGNATURE_TYPE_EIP712: u8 = 2;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Failed to sign: {0}")]
    Signing(String),

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid signing payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;

/// Capabilities the trade client needs from a wallet bound to one account
#[async_trait]
pub trait MarketplaceWallet: Send + Sync {
    /// Account that signs and pays for transactions
    fn address(&self) -> Address;

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256>;

    async fn is_approved_for_all(&self, nft: Address, owner: Address, operator: Address) -> Result<bool>;

    /// Fill nonce, gas and chain id, then sign locally. Returns the raw signed transaction.
    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes>;

    /// Broadcast a raw signed transaction and wait for inclusion
    async fn send_signed(&self, raw: Bytes) -> Result<Option<TransactionReceipt>>;

    /// Sign an EIP-712 order payload; returns the signed order as a JSON string
    async fn sign_order(&self, payload: &Value) -> Result<String>;
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// [`MarketplaceWallet`] over an ethers HTTP provider and a local key
pub struct EthersWallet {
    client: Arc<SignerClient>,
}

impl EthersWallet {
    /// Connect `wallet` to `rpc_url` on Avalanche C-Chain
    pub fn new(wallet: LocalWallet, rpc_url: &str) -> Result<Self> {
        Self::with_chain_id(wallet, rpc_url, AVALANCHE_CHAIN_ID)
    }

    pub fn with_chain_id(wallet: LocalWallet, rpc_url: &str, chain_id: u64) -> Result<Self> {
        let provider =
            Provider::<Http>::try_from(rpc_url).map_err(|e| WalletError::Provider(e.to_string()))?;
        let wallet = wallet.with_chain_id(chain_id);

        debug!("Wallet {:?} connected to {} (chain {})", wallet.address(), rpc_url, chain_id);

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
        })
    }

    /// Parse a hex private key (with or without 0x prefix)
    pub fn from_private_key(private_key: &str, rpc_url: Option<&str>) -> Result<Self> {
        let wallet = parse_private_key(private_key)?;
        Self::new(wallet, rpc_url.unwrap_or(AVALANCHE_RPC_URL))
    }
}

/// Parse a hex private key (with or without 0x prefix)
pub fn parse_private_key(private_key: &str) -> Result<LocalWallet> {
    private_key
        .trim()
        .trim_start_matches("0x")
        .parse::<LocalWallet>()
        .map_err(|_| WalletError::InvalidPrivateKey)
}

#[async_trait]
impl MarketplaceWallet for EthersWallet {
    fn address(&self) -> Address {
        self.client.address()
    }

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        IERC20::new(token, self.client.clone())
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| WalletError::Contract(e.to_string()))
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256> {
        IERC20::new(token, self.client.clone())
            .balance_of(owner)
            .call()
            .await
            .map_err(|e| WalletError::Contract(e.to_string()))
    }

    async fn is_approved_for_all(&self, nft: Address, owner: Address, operator: Address) -> Result<bool> {
        IERC721::new(nft, self.client.clone())
            .is_approved_for_all(owner, operator)
            .call()
            .await
            .map_err(|e| WalletError::Contract(e.to_string()))
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes> {
        let mut tx: TypedTransaction = tx.from(self.address()).into();
        self.client
            .fill_transaction(&mut tx, None)
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))?;

        let signature = self
            .client
            .signer()
            .sign_transaction(&tx)
            .await
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        Ok(tx.rlp_signed(&signature))
    }

    async fn send_signed(&self, raw: Bytes) -> Result<Option<TransactionReceipt>> {
        let pending = self
            .client
            .send_raw_transaction(raw)
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))?;

        debug!("Transaction sent: {:?}", pending.tx_hash());

        pending
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))
    }

    async fn sign_order(&self, payload: &Value) -> Result<String> {
        let typed: TypedData = serde_json::from_value(payload.clone())
            .map_err(|e| WalletError::InvalidPayload(e.to_string()))?;

        let signature = self
            .client
            .signer()
            .sign_typed_data(&typed)
            .await
            .map_err(|e| WalletError::Signing(e.to_string()))?;

        let message: Map<String, Value> = typed.message.into_iter().collect();
        serde_json::to_string(&signed_order(message, &signature))
            .map_err(|e| WalletError::InvalidPayload(e.to_string()))
    }
}

/// Attach an EIP-712 signature to the order message
fn signed_order(mut message: Map<String, Value>, signature: &Signature) -> Value {
    message.insert(
        "signature".to_string(),
        serde_json::json!({
            "signatureType": SIGNATURE_TYPE_EIP712,
            "v": signature.v,
            "r": word_to_hex(signature.r),
            "s": word_to_hex(signature.s),
        }),
    );
    Value::Object(message)
}

fn word_to_hex(word: U256) -> String {
    let mut bytes = [0u8; 32];
    word.to_big_endian(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_KEY: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    fn order_payload() -> Value {
        json!({
            "types": {
                "EIP712Domain": [
                    { "name": "name", "type": "string" },
                    { "name": "version", "type": "string" },
                    { "name": "chainId", "type": "uint256" },
                    { "name": "verifyingContract", "type": "address" }
                ],
                "ERC721Order": [
                    { "name": "maker", "type": "address" },
                    { "name": "erc20TokenAmount", "type": "uint256" }
                ]
            },
            "primaryType": "ERC721Order",
            "domain": {
                "name": "ZeroEx",
                "version": "1.0.0",
                "chainId": "43114",
                "verifyingContract": "0xdef1c0ded9bec7f1a1670819833240f027b25eff"
            },
            "message": {
                "maker": "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf",
                "erc20TokenAmount": "1000"
            }
        })
    }

    #[test]
    fn test_parse_private_key() {
        assert!(parse_private_key(TEST_KEY).is_ok());
        assert!(parse_private_key(&TEST_KEY[2..]).is_ok());
        assert!(matches!(parse_private_key("nope"), Err(WalletError::InvalidPrivateKey)));
    }

    #[test]
    fn test_wallet_address() {
        let wallet = EthersWallet::from_private_key(TEST_KEY, Some("http://127.0.0.1:8545")).unwrap();
        let expected: Address = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".parse().unwrap();
        assert_eq!(wallet.address(), expected);
    }

    #[test]
    fn test_signed_order_shape() {
        let signature = Signature {
            r: U256::from(1u64),
            s: U256::from(2u64),
            v: 27,
        };
        let mut message = Map::new();
        message.insert("maker".to_string(), json!("0xabc"));

        let order = signed_order(message, &signature);

        assert_eq!(order["maker"], json!("0xabc"));
        assert_eq!(order["signature"]["signatureType"], json!(2));
        assert_eq!(order["signature"]["v"], json!(27));
        assert_eq!(
            order["signature"]["r"],
            json!("0x0000000000000000000000000000000000000000000000000000000000000001")
        );
    }

    #[tokio::test]
    async fn test_sign_order_offline() {
        let wallet = EthersWallet::from_private_key(TEST_KEY, Some("http://127.0.0.1:8545")).unwrap();

        let signed = wallet.sign_order(&order_payload()).await.unwrap();
        let order: Value = serde_json::from_str(&signed).unwrap();

        assert_eq!(order["erc20TokenAmount"], json!("1000"));
        let v = order["signature"]["v"].as_u64().unwrap();
        assert!(v == 27 || v == 28);
    }

    #[tokio::test]
    async fn test_sign_order_rejects_non_typed_data() {
        let wallet = EthersWallet::from_private_key(TEST_KEY, Some("http://127.0.0.1:8545")).unwrap();
        let result = wallet.sign_order(&json!({ "hello": "world" })).await;
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));
    }
}
