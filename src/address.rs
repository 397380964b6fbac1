//! SS58 address encoding and decoding for account ids
//!
//! Uses the bs58 crate for base58 encoding, matching the Substrate ecosystem.
//! See: https://docs.substrate.io/reference/address-formats/

use core::str::FromStr;

use blake2::{Blake2b512, Digest};

use crate::error::TransferError;
use crate::types::AccountId;

/// SS58 prefix for checksum calculation
const SS58_PREFIX: &[u8] = b"SS58PRE";

/// Generic Substrate network prefix (addresses start with '5')
pub const SUBSTRATE_PREFIX: u16 = 42;

/// Encode an account id to SS58 address format
pub fn encode_ss58(account: &AccountId, prefix: u16) -> Result<String, TransferError> {
    let mut payload = encode_prefix(prefix)?;
    payload.extend_from_slice(account.as_bytes());

    // first 2 bytes of the Blake2b-512 checksum
    let checksum = ss58_checksum(&payload);
    payload.extend_from_slice(&checksum[..2]);

    Ok(bs58::encode(&payload).into_string())
}

/// Decode an SS58 address to account id and network prefix
pub fn decode_ss58(address: &str) -> Result<(AccountId, u16), TransferError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| invalid_address(format!("Invalid base58: {}", e)))?;

    if decoded.len() < 35 {
        return Err(invalid_address("Address too short".to_string()));
    }

    let (prefix, prefix_len) = decode_prefix(&decoded)?;

    let checksum_start = decoded.len() - 2;
    let account = AccountId::from_slice(&decoded[prefix_len..checksum_start])
        .map_err(|_| invalid_address("Invalid public key length".to_string()))?;

    let expected_checksum = ss58_checksum(&decoded[..checksum_start]);
    if decoded[checksum_start..] != expected_checksum[..2] {
        return Err(invalid_address("Invalid checksum".to_string()));
    }

    Ok((account, prefix))
}

impl FromStr for AccountId {
    type Err = TransferError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        decode_ss58(address).map(|(account, _)| account)
    }
}

fn invalid_address(reason: String) -> TransferError {
    TransferError::InvalidArgument(format!("Invalid address: {}", reason))
}

/// Encode SS58 prefix (supports single and two-byte prefixes)
fn encode_prefix(prefix: u16) -> Result<Vec<u8>, TransferError> {
    if prefix < 64 {
        Ok(vec![prefix as u8])
    } else if prefix < 16384 {
        let first = ((prefix & 0b0000_0000_1111_1100) as u8) >> 2 | 0b0100_0000;
        let second = ((prefix >> 8) as u8) | ((prefix & 0b0000_0000_0000_0011) as u8) << 6;
        Ok(vec![first, second])
    } else {
        Err(invalid_address(format!("Invalid prefix: {}", prefix)))
    }
}

/// Decode SS58 prefix from raw bytes
fn decode_prefix(data: &[u8]) -> Result<(u16, usize), TransferError> {
    match data[0] {
        0..=63 => Ok((data[0] as u16, 1)),
        64..=127 => {
            let lower = (data[0] & 0b0011_1111) << 2 | (data[1] >> 6);
            let upper = data[1] & 0b0011_1111;
            Ok((((upper as u16) << 8) | (lower as u16), 2))
        }
        byte => Err(invalid_address(format!("Invalid prefix byte: {}", byte))),
    }
}

/// Blake2b-512 of "SS58PRE" || payload
fn ss58_checksum(payload: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_PREFIX);
    hasher.update(payload);
    let result = hasher.finalize();
    let mut checksum = [0u8; 64];
    checksum.copy_from_slice(&result);
    checksum
}
