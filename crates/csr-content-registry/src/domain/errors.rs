//! # Registry Errors
//!
//! Every refused call maps to exactly one `RegistryError` variant. A failed
//! call never leaves a partial write behind.

use super::entities::RevisionState;
use csr_signature_verification::SignatureError;
use shared_types::{Address, RevisionHash, SpaceId};
use thiserror::Error;

/// Errors returned by registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The space id already has an owner.
    #[error("space '{space_id}' already exists")]
    AlreadyExists { space_id: SpaceId },

    /// No space with this id.
    #[error("space '{space_id}' does not exist")]
    SpaceNotFound { space_id: SpaceId },

    /// No revision with this hash in the space.
    #[error("revision '{hash}' not found in space '{space_id}'")]
    RevisionNotFound {
        space_id: SpaceId,
        hash: RevisionHash,
    },

    /// The (space, hash) pair is already recorded.
    #[error("revision '{hash}' already recorded in space '{space_id}'")]
    RevisionExists {
        space_id: SpaceId,
        hash: RevisionHash,
    },

    /// The named parent is not recorded in the space.
    #[error("parent revision '{parent}' not found in space '{space_id}'")]
    ParentNotFound {
        space_id: SpaceId,
        parent: RevisionHash,
    },

    /// A parentless revision was submitted to a space that already has a root.
    #[error("space '{space_id}' already has a root revision")]
    RootAlreadyExists { space_id: SpaceId },

    /// Only the space owner may moderate revisions.
    #[error("caller {caller} is not the owner {owner} of the space")]
    Unauthorized { caller: Address, owner: Address },

    /// The revision already reached a terminal state.
    #[error("revision is {state}, not PENDING")]
    NotPending { state: RevisionState },

    /// The supplied nonce is not the identity's current nonce.
    #[error("nonce mismatch: expected {expected}, got {provided}")]
    NonceMismatch { expected: u64, provided: u64 },

    /// The identity's nonce is at `u64::MAX` and cannot advance.
    #[error("nonce of {identity} is exhausted")]
    NonceExhausted { identity: Address },

    /// The signature is malformed or was not produced by the claimed owner.
    #[error("invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// The underlying key-value store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] KvStoreError),

    /// A stored record could not be encoded or decoded.
    #[error("record codec failure: {message}")]
    Codec { message: String },
}

impl RegistryError {
    /// Stable name of the failure, used on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::AlreadyExists { .. } => "AlreadyExists",
            RegistryError::SpaceNotFound { .. } => "SpaceNotFound",
            RegistryError::RevisionNotFound { .. } => "RevisionNotFound",
            RegistryError::RevisionExists { .. } => "RevisionExists",
            RegistryError::ParentNotFound { .. } => "ParentNotFound",
            RegistryError::RootAlreadyExists { .. } => "RootAlreadyExists",
            RegistryError::Unauthorized { .. } => "Unauthorized",
            RegistryError::NotPending { .. } => "NotPending",
            RegistryError::NonceMismatch { .. } => "NonceMismatch",
            RegistryError::NonceExhausted { .. } => "NonceExhausted",
            RegistryError::InvalidSignature { .. } => "InvalidSignature",
            RegistryError::Storage(_) => "Storage",
            RegistryError::Codec { .. } => "Codec",
        }
    }
}

impl From<RecoveryError> for RegistryError {
    fn from(err: RecoveryError) -> Self {
        RegistryError::InvalidSignature {
            reason: err.to_string(),
        }
    }
}

impl From<bincode::Error> for RegistryError {
    fn from(err: bincode::Error) -> Self {
        RegistryError::Codec {
            message: err.to_string(),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KvStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IoError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Identity recovery errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecoveryError {
    /// The signature bytes could not be parsed.
    #[error("malformed signature: {0}")]
    Malformed(SignatureError),

    /// The signature parsed but no signer could be recovered from it.
    #[error("signer could not be recovered: {0}")]
    Unrecoverable(SignatureError),
}
