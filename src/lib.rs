//! wasm-dot-transfer: signed balance transfers for Substrate chains
//!
//! This crate turns "transfer amount X to address Y, signed by key K" into a
//! SCALE-encoded, sr25519-signed extrinsic ready for submission.
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`
//!
//! The core pipeline is `call` -> `context` -> `extra` -> `signer` ->
//! `extrinsic`, driven by [`BalancesTransfer::transfer`]. Chain access is
//! abstracted behind [`ChainContext`]; key material behind [`Signer`].

pub mod address;
pub mod call;
pub mod codec;
pub mod context;
pub mod error;
pub mod extra;
pub mod extrinsic;
pub mod signer;
pub mod transfer;
pub mod types;
pub mod wasm;

// Re-export main types for convenience
pub use address::{decode_ss58, encode_ss58};
pub use call::{build_transfer_call, Call};
pub use codec::{blake2_256, CompactBigUint};
pub use context::{fetch_context, ChainContext, SigningContext};
pub use error::{BoxError, ErrorKind, TransferError};
pub use extra::{build_extra, SignedExtra};
pub use extrinsic::{assemble, Extrinsic, SignaturePayload};
pub use signer::{
    sign_payload, signing_message, signing_payload, MultiSignature, Signer, Sr25519Signer,
};
pub use transfer::{build_signed, BalancesTransfer};
pub use types::{AccountId, ImmortalEra, MultiAddress, TransferConfig, H256};
