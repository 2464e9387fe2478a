//! # Core Value Objects
//!
//! Identifiers shared by the signature, registry and runtime crates.
//!
//! ## Encodings
//!
//! - `Address`: 20 bytes, `0x`-prefixed lowercase hex as text
//! - `Hash`: 32 bytes, `0x`-prefixed lowercase hex as text
//! - `SpaceId`: 32 bytes, name bytes left-aligned and right-padded with `0x00`
//! - `RevisionHash`: opaque caller-supplied reference, 1..=128 bytes

use crate::errors::IdentifierError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of the fixed space identifier encoding.
pub const SPACE_ID_LEN: usize = 32;

/// Maximum accepted length of a revision reference.
pub const MAX_REVISION_HASH_LEN: usize = 128;

// =============================================================================
// HEX HELPERS
// =============================================================================

fn decode_hex_exact<const N: usize>(s: &str) -> Result<[u8; N], IdentifierError> {
    let trimmed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(trimmed).map_err(|e| IdentifierError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(IdentifierError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account identity.
///
/// Derived from a secp256k1 public key as the last 20 bytes of its
/// Keccak-256 digest. Every registry call is attributed to one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_exact::<20>(s).map(Self)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte digest (Keccak-256 throughout this workspace).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_exact::<32>(s).map(Self)
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

// =============================================================================
// SPACE ID (fixed 32 bytes)
// =============================================================================

/// Fixed-width identifier of a content space.
///
/// The name is copied left-aligned into 32 bytes and right-padded with
/// zeros. Names longer than 32 bytes are refused rather than truncated, so
/// two distinct names can never collapse into the same key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId([u8; SPACE_ID_LEN]);

impl SpaceId {
    /// Encode a name (raw bytes) into a space identifier.
    pub fn from_name(name: impl AsRef<[u8]>) -> Result<Self, IdentifierError> {
        let name = name.as_ref();
        if name.len() > SPACE_ID_LEN {
            return Err(IdentifierError::IdentifierTooLong {
                max: SPACE_ID_LEN,
                actual: name.len(),
            });
        }
        let mut bytes = [0u8; SPACE_ID_LEN];
        bytes[..name.len()].copy_from_slice(name);
        Ok(Self(bytes))
    }

    /// Wrap an already padded 32-byte identifier.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SPACE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// The padded 32-byte encoding.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SPACE_ID_LEN] {
        &self.0
    }

    /// Name bytes with the zero padding removed.
    #[must_use]
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        &self.0[..end]
    }

    /// Name as text, lossy for non-UTF-8 identifiers.
    #[must_use]
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.name_bytes()).into_owned()
    }
}

impl fmt::Debug for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpaceId({:?})", self.name())
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for SpaceId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Serialize for SpaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.name())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for SpaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_name(s).map_err(D::Error::custom)
        } else {
            <[u8; SPACE_ID_LEN]>::deserialize(deserializer).map(Self)
        }
    }
}

// =============================================================================
// REVISION HASH (opaque reference)
// =============================================================================

/// Caller-supplied content reference of a revision (typically a CID).
///
/// Only uniqueness is enforced by the registry. The value is never empty;
/// an absent parent is modelled as `Option::None`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RevisionHash(String);

impl RevisionHash {
    /// Validate and wrap a revision reference.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentifierError::EmptyRevisionHash);
        }
        if value.len() > MAX_REVISION_HASH_LEN {
            return Err(IdentifierError::RevisionHashTooLong {
                max: MAX_REVISION_HASH_LEN,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    /// Parse an optional reference where the empty string means "none".
    pub fn optional(value: &str) -> Result<Option<Self>, IdentifierError> {
        if value.is_empty() {
            Ok(None)
        } else {
            Self::new(value).map(Some)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for RevisionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevisionHash({})", self.0)
    }
}

impl fmt::Display for RevisionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RevisionHash {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for RevisionHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(D::Error::custom)
    }
}
