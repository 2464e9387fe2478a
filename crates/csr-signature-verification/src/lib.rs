//! # Signature Verification (CSR)
//!
//! secp256k1 signer recovery used by the registry's delegated-creation path.
//!
//! ## Architecture
//!
//! Pure domain logic, no I/O:
//! - `domain::ecdsa` - scalar validation, malleability checks, address recovery
//! - `domain::message` - EIP-191 personal-message hashing
//! - `domain::entities` - the 65-byte `r || s || v` signature
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Domain Separation**: registry digests are signed as personal messages,
//!   never as raw transaction hashes

pub mod domain;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, invert_s, keccak256, recover_address, recover_personal_signer,
    EcdsaVerifier,
};
pub use domain::entities::{EcdsaSignature, SIGNATURE_LEN};
pub use domain::errors::SignatureError;
pub use domain::message::{hash_personal_message, PERSONAL_MESSAGE_PREFIX};

#[cfg(any(test, feature = "test-helpers"))]
pub use domain::ecdsa::test_helpers;
