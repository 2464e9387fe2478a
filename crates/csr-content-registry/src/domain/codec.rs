//! # Record Codec
//!
//! Records are stored as bincode; nonces as a bare big-endian `u64`.

use super::errors::RegistryError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode_record<T: Serialize>(record: &T) -> Result<Vec<u8>, RegistryError> {
    Ok(bincode::serialize(record)?)
}

pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RegistryError> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn encode_nonce(nonce: u64) -> Vec<u8> {
    nonce.to_be_bytes().to_vec()
}

pub fn decode_nonce(bytes: &[u8]) -> Result<u64, RegistryError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| RegistryError::Codec {
        message: format!("nonce must be 8 bytes, found {}", bytes.len()),
    })?;
    Ok(u64::from_be_bytes(raw))
}
