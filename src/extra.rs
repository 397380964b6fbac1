//! Signed extra assembly
//!
//! The extra bundles runtime constants and per-account state into the
//! signature. Its encoding follows declaration order: spec version, tx
//! version, genesis hash, checkpoint hash, era, compact nonce, compact tip.

use parity_scale_codec::{Compact, Decode, Encode, Output};

use crate::types::{ImmortalEra, H256};

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct SignedExtra {
    spec_version: u32,
    tx_version: u32,
    genesis_hash: H256,
    /// Block the era is anchored to; the genesis block for an immortal era
    checkpoint_hash: H256,
    era: ImmortalEra,
    #[codec(compact)]
    nonce: u64,
    #[codec(compact)]
    tip: u128,
}

/// Build the extra for an immortal transaction
///
/// The genesis hash fills both the genesis and checkpoint slots since no
/// mortality window is anchored to a recent block.
pub fn build_extra(
    spec_version: u32,
    tx_version: u32,
    genesis_hash: H256,
    nonce: u64,
    tip: u128,
) -> SignedExtra {
    SignedExtra {
        spec_version,
        tx_version,
        genesis_hash,
        checkpoint_hash: genesis_hash,
        era: ImmortalEra,
        nonce,
        tip,
    }
}

impl SignedExtra {
    pub fn spec_version(&self) -> u32 {
        self.spec_version
    }

    pub fn tx_version(&self) -> u32 {
        self.tx_version
    }

    pub fn genesis_hash(&self) -> &H256 {
        &self.genesis_hash
    }

    pub fn checkpoint_hash(&self) -> &H256 {
        &self.checkpoint_hash
    }

    pub fn era(&self) -> ImmortalEra {
        self.era
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn tip(&self) -> u128 {
        self.tip
    }

    /// Encode the part of the extra carried inside the extrinsic (era, nonce, tip)
    pub(crate) fn encode_explicit_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.era.encode_to(dest);
        Compact(self.nonce).encode_to(dest);
        Compact(self.tip).encode_to(dest);
    }
}
