//! # Creation Digest
//!
//! The 32-byte message an owner signs to authorize a relayed space creation.
//!
//! ```text
//! keccak256( registry[20] || space_id[32] || owner[20] || nonce[32, big-endian] )
//! ```
//!
//! The result is signed as a personal message, so the signature covers
//! `keccak256("\x19Ethereum Signed Message:\n32" || digest)`.

use csr_signature_verification::keccak256;
use shared_types::{Address, Hash, SpaceId};

const DIGEST_INPUT_LEN: usize = 20 + 32 + 20 + 32;

/// Compute the creation digest for `(space_id, owner, nonce)` under a registry.
#[must_use]
pub fn creation_digest(registry: &Address, space_id: &SpaceId, owner: &Address, nonce: u64) -> Hash {
    let mut input = [0u8; DIGEST_INPUT_LEN];
    input[..20].copy_from_slice(registry.as_bytes());
    input[20..52].copy_from_slice(space_id.as_bytes());
    input[52..72].copy_from_slice(owner.as_bytes());
    // nonce as a 256-bit word: 24 zero bytes then the u64
    input[96..].copy_from_slice(&nonce.to_be_bytes());
    keccak256(&input)
}
