//! Balance transfer pipeline
//!
//! Fetch context, assemble extra, encode and sign, assemble extrinsic.
//! Every invocation builds its own call, extra and signature. Two concurrent
//! transfers from the same signer each read their own nonce snapshot and may
//! collide; sequencing them is the caller's job.

use num_bigint::BigInt;

use crate::call::{build_transfer_call, Call};
use crate::context::{fetch_context, ChainContext, SigningContext};
use crate::error::TransferError;
use crate::extra::build_extra;
use crate::extrinsic::{assemble, Extrinsic};
use crate::signer::{sign_payload, Signer};
use crate::types::{AccountId, MultiAddress, TransferConfig};

/// Builds signed balance transfers against one chain
pub struct BalancesTransfer<C> {
    chain: C,
    config: TransferConfig,
}

impl<C: ChainContext> BalancesTransfer<C> {
    pub fn new(chain: C, config: TransferConfig) -> Self {
        Self { chain, config }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Build a signed transfer of `amount` from `signer` to `destination`
    pub async fn transfer<S: Signer + ?Sized>(
        &self,
        signer: &S,
        destination: AccountId,
        amount: &BigInt,
    ) -> Result<Extrinsic, TransferError> {
        let call = build_transfer_call(
            self.config.module_index,
            self.config.call_index,
            destination.into(),
            amount,
        )?;

        let context = fetch_context(&self.chain, &signer.account_id()).await?;
        build_signed(&self.config, signer, call, context)
    }
}

/// Sign `call` under an already fetched context
pub fn build_signed<S: Signer + ?Sized>(
    config: &TransferConfig,
    signer: &S,
    call: Call,
    context: SigningContext,
) -> Result<Extrinsic, TransferError> {
    let extra = build_extra(
        config.spec_version,
        config.tx_version,
        context.genesis_hash,
        context.nonce,
        config.tip,
    );
    let signature = sign_payload(&call, &extra, signer)?;

    let signer_address = MultiAddress::from(signer.account_id());
    let extrinsic = assemble(signer_address, signature, extra, call);
    tracing::info!(
        signer = %signer_address.account_id(),
        nonce = context.nonce,
        hash = %hex::encode(extrinsic.hash()),
        "assembled signed transfer"
    );
    Ok(extrinsic)
}
