//! Chain context required for signing
//!
//! The genesis hash and the signer's nonce are fetched concurrently and
//! joined. Either failure fails the whole fetch; the other request is
//! dropped and no partial context is returned.

use async_trait::async_trait;

use crate::error::{BoxError, TransferError};
use crate::types::{AccountId, H256};

/// Chain state provider, usually backed by an RPC client
#[async_trait]
pub trait ChainContext: Send + Sync {
    /// Hash of block 0
    async fn genesis_hash(&self) -> Result<H256, BoxError>;

    /// Next nonce for `account`, including transactions pending in the pool
    async fn account_nonce(&self, account: &AccountId) -> Result<u64, BoxError>;
}

/// State fetched from the chain for one signing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningContext {
    pub genesis_hash: H256,
    pub nonce: u64,
}

/// Fetch genesis hash and nonce concurrently
pub async fn fetch_context<C: ChainContext + ?Sized>(
    chain: &C,
    account: &AccountId,
) -> Result<SigningContext, TransferError> {
    let genesis = async {
        chain
            .genesis_hash()
            .await
            .map_err(|source| TransferError::ContextFetch {
                item: "genesis hash",
                source,
            })
    };
    let nonce = async {
        chain
            .account_nonce(account)
            .await
            .map_err(|source| TransferError::ContextFetch {
                item: "account nonce",
                source,
            })
    };

    let (genesis_hash, nonce) = futures::try_join!(genesis, nonce).inspect_err(|err| {
        tracing::warn!(%account, error = %err, "context fetch failed");
    })?;

    tracing::debug!(%account, %genesis_hash, nonce, "fetched signing context");
    Ok(SigningContext {
        genesis_hash,
        nonce,
    })
}
