//! Error types for wasm-dot-transfer

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Boxed error returned by chain context providers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The pipeline stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ContextFetch,
    Signing,
    Encoding,
    Decode,
}

/// Main error type for transfer construction
#[derive(Debug, Error)]
pub enum TransferError {
    /// Malformed call construction input (negative amount, bad address)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Genesis hash or nonce retrieval failed
    #[error("Failed to fetch {item}: {source}")]
    ContextFetch {
        item: &'static str,
        #[source]
        source: BoxError,
    },
    /// Key material missing or the signing primitive rejected the input
    #[error("Signing failed: {0}")]
    Signing(String),
    /// Value violates the size or range invariant of its encoding
    #[error("Encoding failed: {0}")]
    Encoding(String),
    /// SCALE codec decode error
    #[error("SCALE decode error: {0}")]
    Decode(String),
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransferError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            TransferError::ContextFetch { .. } => ErrorKind::ContextFetch,
            TransferError::Signing(_) => ErrorKind::Signing,
            TransferError::Encoding(_) => ErrorKind::Encoding,
            TransferError::Decode(_) => ErrorKind::Decode,
        }
    }
}

impl From<parity_scale_codec::Error> for TransferError {
    fn from(err: parity_scale_codec::Error) -> Self {
        TransferError::Decode(err.to_string())
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<TransferError> for JsValue {
    fn from(err: TransferError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
