//! WASM bindings for wasm-dot-transfer
//!
//! Thin wrappers with #[wasm_bindgen] that delegate to the core
//! implementations.

pub mod transfer;

pub use transfer::{TransferNamespace, WasmExtrinsic};
