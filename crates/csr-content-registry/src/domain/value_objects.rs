//! # Value Objects
//!
//! Registry configuration and the persistent key layout.

use serde::{Deserialize, Serialize};
use shared_types::{Address, RevisionHash, SpaceId};

/// Registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Domain constant mixed into every creation digest. Signatures made
    /// for one deployment never validate against another.
    pub registry_address: Address,
}

impl RegistryConfig {
    #[must_use]
    pub fn new(registry_address: Address) -> Self {
        Self { registry_address }
    }
}

/// Key prefixes for the three keyspaces sharing one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `space:{space_id}` -> Space
    Space,
    /// `rev:{space_id}{hash}` -> Revision
    Revision,
    /// `nonce:{address}` -> u64 big-endian
    Nonce,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Space => b"space:",
            KeyPrefix::Revision => b"rev:",
            KeyPrefix::Nonce => b"nonce:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    pub fn space_key(space_id: &SpaceId) -> Vec<u8> {
        KeyPrefix::Space.key(space_id.as_bytes())
    }

    /// Prefix shared by every revision of one space. Space ids are fixed
    /// width, so one space's range never overlaps another's.
    pub fn revisions_of(space_id: &SpaceId) -> Vec<u8> {
        KeyPrefix::Revision.key(space_id.as_bytes())
    }

    pub fn revision_key(space_id: &SpaceId, hash: &RevisionHash) -> Vec<u8> {
        let mut key = Self::revisions_of(space_id);
        key.extend_from_slice(hash.as_bytes());
        key
    }

    pub fn nonce_key(identity: &Address) -> Vec<u8> {
        KeyPrefix::Nonce.key(identity.as_bytes())
    }
}
