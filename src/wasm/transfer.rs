//! WASM bindings for transfer building
//!
//! The JS side fetches the chain context itself and passes it in; these
//! bindings run the synchronous part of the pipeline.

use num_bigint::BigInt;
use parity_scale_codec::Encode;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::address::{encode_ss58, SUBSTRATE_PREFIX};
use crate::call::{build_transfer_call, Call};
use crate::context::SigningContext;
use crate::error::TransferError;
use crate::extra::build_extra;
use crate::extrinsic::Extrinsic;
use crate::signer::{signing_message, signing_payload, Signer, Sr25519Signer};
use crate::transfer::build_signed;
use crate::types::{AccountId, TransferConfig, H256};

/// Signing context as passed from JS
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SigningContextJs {
    genesis_hash: String,
    nonce: u64,
}

impl SigningContextJs {
    fn into_inner(self) -> Result<SigningContext, TransferError> {
        Ok(SigningContext {
            genesis_hash: H256::from_hex(&self.genesis_hash)?,
            nonce: self.nonce,
        })
    }
}

fn parse_context(context: JsValue) -> Result<SigningContext, JsValue> {
    let context: SigningContextJs = serde_wasm_bindgen::from_value(context)
        .map_err(|e| JsValue::from_str(&format!("Invalid context: {}", e)))?;
    Ok(context.into_inner()?)
}

fn parse_config(config: JsValue) -> Result<TransferConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(TransferConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
}

fn parse_call(
    destination: &str,
    amount: &str,
    config: &TransferConfig,
) -> Result<Call, TransferError> {
    let destination: AccountId = destination.parse()?;
    let amount: BigInt = amount.parse().map_err(|e| {
        TransferError::InvalidArgument(format!("Invalid amount '{}': {}", amount, e))
    })?;
    build_transfer_call(
        config.module_index,
        config.call_index,
        destination.into(),
        &amount,
    )
}

/// Namespace for transfer operations
#[wasm_bindgen]
pub struct TransferNamespace;

#[wasm_bindgen]
impl TransferNamespace {
    /// Build a signed balance transfer
    ///
    /// # Arguments
    /// * `seed` - 32-byte sr25519 mini secret
    /// * `destination` - Recipient address (SS58)
    /// * `amount` - Amount in planck as a decimal string
    /// * `context` - `{ genesisHash, nonce }` fetched from the chain
    /// * `config` - Optional `{ specVersion, txVersion, moduleIndex, callIndex, tip }`
    #[wasm_bindgen(js_name = buildSignedTransfer)]
    pub fn build_signed_transfer(
        seed: &[u8],
        destination: &str,
        amount: &str,
        context: JsValue,
        config: JsValue,
    ) -> Result<WasmExtrinsic, JsValue> {
        let config = parse_config(config)?;
        let context = parse_context(context)?;
        let signer = Sr25519Signer::from_seed(seed)?;
        let call = parse_call(destination, amount, &config)?;

        let inner = build_signed(&config, &signer, call, context)?;
        Ok(WasmExtrinsic { inner })
    }

    /// Get the message an external signer has to sign for this transfer
    ///
    /// Payloads above 256 bytes come back already hashed.
    #[wasm_bindgen(js_name = signingPayload)]
    pub fn transfer_signing_message(
        destination: &str,
        amount: &str,
        context: JsValue,
        config: JsValue,
    ) -> Result<Vec<u8>, JsValue> {
        let config = parse_config(config)?;
        let context = parse_context(context)?;
        let call = parse_call(destination, amount, &config)?;
        let extra = build_extra(
            config.spec_version,
            config.tx_version,
            context.genesis_hash,
            context.nonce,
            config.tip,
        );

        let payload = signing_payload(&call, &extra);
        Ok(signing_message(&payload).into_owned())
    }

    /// Get the SS58 address for a seed
    #[wasm_bindgen(js_name = addressFromSeed)]
    pub fn address_from_seed(seed: &[u8], prefix: Option<u16>) -> Result<String, JsValue> {
        let signer = Sr25519Signer::from_seed(seed)?;
        Ok(encode_ss58(
            &signer.account_id(),
            prefix.unwrap_or(SUBSTRATE_PREFIX),
        )?)
    }
}

/// WASM-exposed signed extrinsic
#[wasm_bindgen]
pub struct WasmExtrinsic {
    inner: Extrinsic,
}

#[wasm_bindgen]
impl WasmExtrinsic {
    /// Wire bytes, ready for submission
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.encode()
    }

    #[wasm_bindgen(js_name = toHex)]
    pub fn to_hex(&self) -> String {
        self.inner.to_hex()
    }

    /// Transaction id (Blake2-256 of the wire bytes)
    #[wasm_bindgen(getter)]
    pub fn hash(&self) -> String {
        format!("0x{}", hex::encode(self.inner.hash()))
    }

    /// Signer address (SS58 encoded)
    #[wasm_bindgen]
    pub fn signer(&self, prefix: Option<u16>) -> Result<String, JsValue> {
        Ok(encode_ss58(
            self.inner.signer().account_id(),
            prefix.unwrap_or(SUBSTRATE_PREFIX),
        )?)
    }

    #[wasm_bindgen(getter)]
    pub fn nonce(&self) -> u64 {
        self.inner.extra().nonce()
    }

    /// The 64-byte signature without its scheme tag
    #[wasm_bindgen(getter)]
    pub fn signature(&self) -> Vec<u8> {
        self.inner.signature().as_bytes().to_vec()
    }
}
