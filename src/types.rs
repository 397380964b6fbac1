//! Shared types for DOT transfers

use core::fmt;

use parity_scale_codec::{Decode, Encode, Error as CodecError, Input, Output};
use serde::{de, Deserialize, Deserializer};

use crate::error::TransferError;

/// 32-byte public-key-derived account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TransferError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            TransferError::InvalidArgument(format!(
                "Account id must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(AccountId(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Runtime address type. Only the plain account variant is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum MultiAddress {
    #[codec(index = 0)]
    Id(AccountId),
}

impl From<AccountId> for MultiAddress {
    fn from(account: AccountId) -> Self {
        MultiAddress::Id(account)
    }
}

impl MultiAddress {
    pub fn account_id(&self) -> &AccountId {
        match self {
            MultiAddress::Id(account) => account,
        }
    }
}

/// 256-bit block hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct H256(pub [u8; 32]);

impl H256 {
    /// Parse a hex string, with or without `0x` prefix
    pub fn from_hex(hex_str: &str) -> Result<Self, TransferError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransferError::InvalidArgument(format!("Invalid hex: {}", e)))?;
        let hash: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            TransferError::InvalidArgument(format!("Hash must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(H256(hash))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Transaction era marker for transactions that never expire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmortalEra;

impl Encode for ImmortalEra {
    fn size_hint(&self) -> usize {
        1
    }

    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        dest.push_byte(0x00);
    }
}

impl Decode for ImmortalEra {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        match input.read_byte()? {
            0x00 => Ok(ImmortalEra),
            _ => Err("Mortal era is not supported".into()),
        }
    }
}

/// Runtime constants bound into every transfer signature
///
/// Must match the runtime the extrinsic is submitted to, otherwise the
/// node rejects the signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferConfig {
    /// Runtime spec version
    pub spec_version: u32,
    /// Transaction format version
    pub tx_version: u32,
    /// Balances pallet index
    pub module_index: u8,
    /// `transfer` call index within the pallet
    pub call_index: u8,
    /// Tip paid to the block author (in planck)
    #[serde(deserialize_with = "deserialize_u128")]
    pub tip: u128,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            spec_version: 264,
            tx_version: 2,
            module_index: 6,
            call_index: 0,
            tip: 0,
        }
    }
}

/// Deserialize u128 from either a number or string
fn deserialize_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    struct U128Visitor;

    impl<'de> de::Visitor<'de> for U128Visitor {
        type Value = u128;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a u128 as number or string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<u128, E>
        where
            E: de::Error,
        {
            Ok(value as u128)
        }

        fn visit_i64<E>(self, value: i64) -> Result<u128, E>
        where
            E: de::Error,
        {
            u128::try_from(value).map_err(|_| E::custom("negative values not allowed"))
        }

        fn visit_str<E>(self, value: &str) -> Result<u128, E>
        where
            E: de::Error,
        {
            if value.is_empty() {
                return Ok(0);
            }
            value.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U128Visitor)
}
