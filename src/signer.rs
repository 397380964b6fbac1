//! Payload signing
//!
//! The signed payload is `encode(call) ++ encode(extra)`. Payloads longer
//! than 256 bytes are replaced by their Blake2-256 digest before signing.

use core::fmt;
use std::borrow::Cow;

use parity_scale_codec::{Decode, Encode};
use schnorrkel::{ExpansionMode, Keypair, MiniSecretKey, PublicKey};

use crate::call::Call;
use crate::codec::blake2_256;
use crate::error::TransferError;
use crate::extra::SignedExtra;
use crate::types::AccountId;

/// Payloads up to this length are signed as-is
pub const MAX_UNHASHED_PAYLOAD_LEN: usize = 256;

/// Signing context used by Substrate for sr25519
const SIGNING_CTX: &[u8] = b"substrate";

/// Algorithm-tagged signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum MultiSignature {
    #[codec(index = 1)]
    Sr25519([u8; 64]),
}

impl MultiSignature {
    pub fn scheme(&self) -> &'static str {
        match self {
            MultiSignature::Sr25519(_) => "sr25519",
        }
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        match self {
            MultiSignature::Sr25519(bytes) => bytes,
        }
    }

    /// Verify this signature over `message` against the signer's public key
    pub fn verify(&self, message: &[u8], signer: &AccountId) -> bool {
        match self {
            MultiSignature::Sr25519(bytes) => {
                let (Ok(public), Ok(signature)) = (
                    PublicKey::from_bytes(signer.as_bytes()),
                    schnorrkel::Signature::from_bytes(bytes),
                ) else {
                    return false;
                };
                public.verify_simple(SIGNING_CTX, message, &signature).is_ok()
            }
        }
    }
}

/// Key provider holding the signer's private key material
pub trait Signer: Send + Sync {
    /// Account id derived from the signer's public key
    fn account_id(&self) -> AccountId;

    /// Sign `message` exactly as given
    fn sign(&self, message: &[u8]) -> Result<MultiSignature, TransferError>;
}

/// sr25519 keypair signer
pub struct Sr25519Signer {
    keypair: Keypair,
}

impl Sr25519Signer {
    /// Create a signer from a 32-byte mini secret seed
    pub fn from_seed(seed: &[u8]) -> Result<Self, TransferError> {
        let mini = MiniSecretKey::from_bytes(seed).map_err(|e| {
            TransferError::Signing(format!(
                "Invalid sr25519 seed ({} bytes): {}",
                seed.len(),
                e
            ))
        })?;
        Ok(Sr25519Signer {
            keypair: mini.expand_to_keypair(ExpansionMode::Ed25519),
        })
    }
}

impl fmt::Debug for Sr25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sr25519Signer")
            .field("account_id", &self.account_id())
            .finish_non_exhaustive()
    }
}

impl Signer for Sr25519Signer {
    fn account_id(&self) -> AccountId {
        AccountId(self.keypair.public.to_bytes())
    }

    fn sign(&self, message: &[u8]) -> Result<MultiSignature, TransferError> {
        let signature = self.keypair.sign_simple(SIGNING_CTX, message);
        Ok(MultiSignature::Sr25519(signature.to_bytes()))
    }
}

/// Concatenate the encoded call and extra
pub fn signing_payload(call: &Call, extra: &SignedExtra) -> Vec<u8> {
    let mut payload = call.encode();
    extra.encode_to(&mut payload);
    payload
}

/// Reduce a payload to the message actually signed
pub fn signing_message(payload: &[u8]) -> Cow<'_, [u8]> {
    if payload.len() > MAX_UNHASHED_PAYLOAD_LEN {
        Cow::Owned(blake2_256(payload).to_vec())
    } else {
        Cow::Borrowed(payload)
    }
}

/// Sign `call` and `extra` with the signer's key
pub fn sign_payload<S: Signer + ?Sized>(
    call: &Call,
    extra: &SignedExtra,
    signer: &S,
) -> Result<MultiSignature, TransferError> {
    let payload = signing_payload(call, extra);
    let message = signing_message(&payload);
    tracing::debug!(
        payload_len = payload.len(),
        hashed = matches!(message, Cow::Owned(_)),
        "signing payload"
    );
    signer.sign(&message)
}
