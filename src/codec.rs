//! Canonical SCALE encoding helpers
//!
//! Fixed-width integers, byte arrays and records go through
//! `parity_scale_codec` derives on the crate's types. This module adds the
//! pieces the codec crate does not cover: compact encoding of
//! arbitrary-precision integers and the Blake2-256 digest.

use blake2::{digest::consts::U32, Blake2b, Digest};
use num_bigint::BigUint;
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};

use crate::error::TransferError;

/// Largest payload of the big-integer compact mode (prefix holds `len - 4` in 6 bits)
pub const MAX_COMPACT_BYTES: usize = 67;

const SINGLE_BYTE_LIMIT: u32 = 1 << 6;
const TWO_BYTE_LIMIT: u32 = 1 << 14;
const FOUR_BYTE_LIMIT: u32 = 1 << 30;

/// Unsigned integer of arbitrary precision in SCALE compact form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompactBigUint(BigUint);

impl CompactBigUint {
    /// Wrap a value, rejecting anything wider than the big-integer mode allows
    pub fn new(value: BigUint) -> Result<Self, TransferError> {
        if value.bits() > (MAX_COMPACT_BYTES * 8) as u64 {
            return Err(TransferError::Encoding(format!(
                "Compact integer needs {} bits, at most {} are encodable",
                value.bits(),
                MAX_COMPACT_BYTES * 8
            )));
        }
        Ok(CompactBigUint(value))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Returns the value as `u32` when it fits in one of the fixed-width modes
    fn small_value(&self) -> Option<u32> {
        if self.0.bits() > 30 {
            return None;
        }
        Some(self.0.iter_u32_digits().next().unwrap_or(0))
    }
}

impl From<u128> for CompactBigUint {
    fn from(value: u128) -> Self {
        CompactBigUint(BigUint::from(value))
    }
}

impl Encode for CompactBigUint {
    fn size_hint(&self) -> usize {
        match self.small_value() {
            Some(v) if v < SINGLE_BYTE_LIMIT => 1,
            Some(v) if v < TWO_BYTE_LIMIT => 2,
            Some(_) => 4,
            None => 1 + byte_len(&self.0),
        }
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        match self.small_value() {
            Some(v) if v < SINGLE_BYTE_LIMIT => dest.push_byte((v as u8) << 2),
            Some(v) if v < TWO_BYTE_LIMIT => {
                dest.write(&(((v as u16) << 2) | 0b01).to_le_bytes())
            }
            Some(v) => dest.write(&((v << 2) | 0b10).to_le_bytes()),
            None => {
                let bytes = self.0.to_bytes_le();
                dest.push_byte((((bytes.len() - 4) as u8) << 2) | 0b11);
                dest.write(&bytes);
            }
        }
    }
}

impl Decode for CompactBigUint {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let prefix = input.read_byte()?;
        match prefix & 0b11 {
            0b00 => Ok(CompactBigUint(BigUint::from(prefix >> 2))),
            0b01 => {
                let value = u16::from_le_bytes([prefix, input.read_byte()?]) >> 2;
                if (value as u32) < SINGLE_BYTE_LIMIT {
                    return Err("Non-canonical compact encoding".into());
                }
                Ok(CompactBigUint(BigUint::from(value)))
            }
            0b10 => {
                let mut rest = [0u8; 3];
                input.read(&mut rest)?;
                let value = u32::from_le_bytes([prefix, rest[0], rest[1], rest[2]]) >> 2;
                if value < TWO_BYTE_LIMIT {
                    return Err("Non-canonical compact encoding".into());
                }
                Ok(CompactBigUint(BigUint::from(value)))
            }
            _ => {
                let len = (prefix >> 2) as usize + 4;
                let mut bytes = vec![0u8; len];
                input.read(&mut bytes)?;
                let value = BigUint::from_bytes_le(&bytes);
                // top byte must be set and the value must not fit a narrower mode
                if bytes[len - 1] == 0 || value < BigUint::from(FOUR_BYTE_LIMIT) {
                    return Err("Non-canonical compact encoding".into());
                }
                Ok(CompactBigUint(value))
            }
        }
    }
}

fn byte_len(value: &BigUint) -> usize {
    value.bits().div_ceil(8) as usize
}

/// Blake2-256 hash
pub fn blake2_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
