//! Operator approvals
//!
//! Before a trade the marketplace exchange must be allowed to move the asset:
//! WAVAX (ERC-20 allowance) for collection bids, the NFT collection
//! (`setApprovalForAll`) for listings, delistings and accepted bids.
//! Each helper reads the current state and only submits an approval
//! transaction when it is missing, waiting for its receipt before returning.

use super::contracts::{ApproveCall, SetApprovalForAllCall};
use super::wallet::{MarketplaceWallet, WalletError};
use ethers::abi::AbiEncode;
use ethers::types::{Address, TransactionRequest, TxHash, U256, U64};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ApprovalError {
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Approval transaction {0} reverted")]
    Reverted(String),

    #[error("Approval transaction dropped without receipt")]
    NoReceipt,
}

pub type Result<T> = std::result::Result<T, ApprovalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    AlreadyApproved,
    /// Approval submitted and confirmed in this transaction
    Approved(TxHash),
}

/// Make sure `spender` may move at least `required` of `token` for the wallet
///
/// Approves `U256::MAX` to avoid repeated approvals.
pub async fn ensure_erc20_allowance<W: MarketplaceWallet + ?Sized>(
    wallet: &W,
    token: Address,
    spender: Address,
    required: U256,
) -> Result<ApprovalStatus> {
    let owner = wallet.address();
    let allowance = wallet.erc20_allowance(token, owner, spender).await?;

    if allowance >= required {
        debug!("Allowance {} covers {} for {:?}", allowance, required, spender);
        return Ok(ApprovalStatus::AlreadyApproved);
    }

    info!(
        "Approving token {:?} for {:?} (current allowance: {}, needed: {})",
        token, spender, allowance, required
    );
    let call = ApproveCall {
        spender,
        amount: U256::MAX,
    };
    let tx_hash = submit_approval(wallet, token, call.encode()).await?;
    info!("Token approval confirmed: {:?}", tx_hash);

    Ok(ApprovalStatus::Approved(tx_hash))
}

/// Make sure `operator` may transfer any token of the `nft` collection
pub async fn ensure_collection_approval<W: MarketplaceWallet + ?Sized>(
    wallet: &W,
    nft: Address,
    operator: Address,
) -> Result<ApprovalStatus> {
    let owner = wallet.address();

    if wallet.is_approved_for_all(nft, owner, operator).await? {
        debug!("Collection {:?} already approved for {:?}", nft, operator);
        return Ok(ApprovalStatus::AlreadyApproved);
    }

    info!("Approving collection {:?} for operator {:?}", nft, operator);
    let call = SetApprovalForAllCall {
        operator,
        approved: true,
    };
    let tx_hash = submit_approval(wallet, nft, call.encode()).await?;
    info!("Collection approval confirmed: {:?}", tx_hash);

    Ok(ApprovalStatus::Approved(tx_hash))
}

async fn submit_approval<W: MarketplaceWallet + ?Sized>(
    wallet: &W,
    to: Address,
    calldata: Vec<u8>,
) -> Result<TxHash> {
    let tx = TransactionRequest::new().to(to).data(calldata);
    let raw = wallet.sign_transaction(tx).await?;
    let receipt = wallet.send_signed(raw).await?.ok_or(ApprovalError::NoReceipt)?;

    if receipt.status == Some(U64::from(1)) {
        Ok(receipt.transaction_hash)
    } else {
        Err(ApprovalError::Reverted(format!("{:?}", receipt.transaction_hash)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_calldata_selector() {
        let call = ApproveCall {
            spender: Address::zero(),
            amount: U256::MAX,
        };
        let data = call.encode();
        // approve(address,uint256)
        assert_eq!(&data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(data.len(), 4 + 32 * 2);
    }

    #[test]
    fn test_set_approval_for_all_calldata_selector() {
        let call = SetApprovalForAllCall {
            operator: Address::zero(),
            approved: true,
        };
        let data = call.encode();
        // setApprovalForAll(address,bool)
        assert_eq!(&data[..4], &[0xa2, 0x2c, 0xb4, 0x65]);
        assert_eq!(data[data.len() - 1], 1);
    }
}
