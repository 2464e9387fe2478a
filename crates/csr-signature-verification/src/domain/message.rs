//! # Personal Message Hashing (EIP-191, version 0x45)
//!
//! Wallets sign arbitrary payloads as "personal messages": the payload is
//! prefixed with a fixed text and its decimal length before hashing. This
//! keeps a registry authorization from ever being a valid transaction
//! signature.

use super::ecdsa::keccak256;
use shared_types::Hash;

/// Prefix preceding the payload length.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Hash a payload the way `personal_sign` does:
/// `keccak256("\x19Ethereum Signed Message:\n" || len(payload) || payload)`.
#[must_use]
pub fn hash_personal_message(payload: &[u8]) -> Hash {
    let length = payload.len().to_string();
    let mut buf = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + payload.len());
    buf.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf.extend_from_slice(length.as_bytes());
    buf.extend_from_slice(payload);
    keccak256(&buf)
}
