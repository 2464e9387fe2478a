//! # Error Types
//!
//! Parsing and validation failures for the shared identifiers.

use thiserror::Error;

/// Errors raised while constructing identifiers from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the fixed width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Space name does not fit the fixed-width encoding.
    #[error("Identifier too long: max {max} bytes, got {actual}")]
    IdentifierTooLong { max: usize, actual: usize },

    /// Revision references must be non-empty.
    #[error("Revision hash must not be empty")]
    EmptyRevisionHash,

    /// Revision reference exceeds the accepted length.
    #[error("Revision hash too long: max {max} bytes, got {actual}")]
    RevisionHashTooLong { max: usize, actual: usize },
}
