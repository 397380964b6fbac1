//! Balance transfer call construction

use num_bigint::BigInt;
use parity_scale_codec::{Decode, Encode};

use crate::codec::CompactBigUint;
use crate::error::TransferError;
use crate::types::MultiAddress;

/// Encoded as `[module_index][call_index][destination][compact(amount)]`
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Call {
    module_index: u8,
    call_index: u8,
    destination: MultiAddress,
    amount: CompactBigUint,
}

impl Call {
    pub fn module_index(&self) -> u8 {
        self.module_index
    }

    pub fn call_index(&self) -> u8 {
        self.call_index
    }

    pub fn destination(&self) -> &MultiAddress {
        &self.destination
    }

    pub fn amount(&self) -> &CompactBigUint {
        &self.amount
    }

    /// Decode a call from its SCALE bytes, rejecting trailing data
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransferError> {
        let mut input = bytes;
        let call = Call::decode(&mut input)?;
        if !input.is_empty() {
            return Err(TransferError::Decode(format!(
                "{} trailing bytes after call",
                input.len()
            )));
        }
        Ok(call)
    }
}

/// Build a balances transfer call
///
/// Fails with `InvalidArgument` for a negative amount and with `Encoding`
/// when the amount is too wide for the compact big-integer mode.
pub fn build_transfer_call(
    module_index: u8,
    call_index: u8,
    destination: MultiAddress,
    amount: &BigInt,
) -> Result<Call, TransferError> {
    let amount = amount.to_biguint().ok_or_else(|| {
        TransferError::InvalidArgument(format!("Transfer amount must not be negative: {}", amount))
    })?;

    Ok(Call {
        module_index,
        call_index,
        destination,
        amount: CompactBigUint::new(amount)?,
    })
}
