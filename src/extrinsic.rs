//! Signed extrinsic assembly and wire encoding

use parity_scale_codec::{Encode, Output};

use crate::call::Call;
use crate::codec::blake2_256;
use crate::extra::SignedExtra;
use crate::signer::MultiSignature;
use crate::types::MultiAddress;

/// Extrinsic format version
pub const EXTRINSIC_FORMAT_VERSION: u8 = 4;

/// Version byte flag marking a signed extrinsic
const SIGNED_FLAG: u8 = 0b1000_0000;

/// Signer, signature and the extra the signature commits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePayload {
    address: MultiAddress,
    signature: MultiSignature,
    extra: SignedExtra,
}

impl SignaturePayload {
    pub fn address(&self) -> &MultiAddress {
        &self.address
    }

    pub fn signature(&self) -> &MultiSignature {
        &self.signature
    }

    pub fn extra(&self) -> &SignedExtra {
        &self.extra
    }
}

/// Signed, submission-ready transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrinsic {
    signature: SignaturePayload,
    call: Call,
}

/// Assemble the signed extrinsic from the pipeline artifacts
pub fn assemble(
    signer: MultiAddress,
    signature: MultiSignature,
    extra: SignedExtra,
    call: Call,
) -> Extrinsic {
    Extrinsic {
        signature: SignaturePayload {
            address: signer,
            signature,
            extra,
        },
        call,
    }
}

impl Extrinsic {
    pub fn signature_payload(&self) -> &SignaturePayload {
        &self.signature
    }

    pub fn signer(&self) -> &MultiAddress {
        &self.signature.address
    }

    pub fn signature(&self) -> &MultiSignature {
        &self.signature.signature
    }

    pub fn extra(&self) -> &SignedExtra {
        &self.signature.extra
    }

    pub fn call(&self) -> &Call {
        &self.call
    }

    /// Transaction id (Blake2-256 of the wire bytes)
    pub fn hash(&self) -> [u8; 32] {
        blake2_256(&self.encode())
    }

    /// Wire bytes as `0x`-prefixed hex
    ///
    /// The signature covers `call ++ extra` in declaration order (versions and
    /// hashes before era, nonce and tip). Runtimes that check the era-first
    /// payload order will reject the signature.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode()))
    }
}

impl Encode for Extrinsic {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        let mut body = vec![SIGNED_FLAG | EXTRINSIC_FORMAT_VERSION];
        self.signature.address.encode_to(&mut body);
        self.signature.signature.encode_to(&mut body);
        // spec/tx version and block hashes are signed but not transmitted,
        // the signed payload keeps them ahead of era/nonce/tip
        self.signature.extra.encode_explicit_to(&mut body);
        self.call.encode_to(&mut body);

        // compact length prefix followed by the body
        body.encode_to(dest);
    }
}
