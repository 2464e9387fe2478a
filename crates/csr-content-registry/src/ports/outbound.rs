//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the registry service.
//!
//! These are the interfaces the host application implements: persistent
//! storage, identity recovery and event delivery.

use crate::domain::codec::{decode_nonce, decode_record};
use crate::domain::entities::{Revision, Space};
use crate::domain::errors::{KvStoreError, RecoveryError, RegistryError};
use crate::domain::events::RegistryEvent;
use crate::domain::value_objects::KeyPrefix;
use shared_types::{Address, Hash, RevisionHash, SpaceId};

/// Key/value pairs returned by a prefix scan.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
///
/// Production: `RocksDbStore` (csr-node-runtime, feature `rocksdb`)
/// Testing: `InMemoryKvStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KvStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KvStoreError>;

    /// Iterate over keys with a prefix.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KvStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Typed reads of registry records over any `KeyValueStore`.
pub trait RegistryStore: KeyValueStore {
    fn load_space(&self, space_id: &SpaceId) -> Result<Option<Space>, RegistryError> {
        self.get(&KeyPrefix::space_key(space_id))?
            .map(|bytes| decode_record(&bytes))
            .transpose()
    }

    fn load_revision(
        &self,
        space_id: &SpaceId,
        hash: &RevisionHash,
    ) -> Result<Option<Revision>, RegistryError> {
        self.get(&KeyPrefix::revision_key(space_id, hash))?
            .map(|bytes| decode_record(&bytes))
            .transpose()
    }

    fn revision_exists(&self, space_id: &SpaceId, hash: &RevisionHash) -> Result<bool, RegistryError> {
        Ok(self.exists(&KeyPrefix::revision_key(space_id, hash))?)
    }

    /// Current nonce; zero for identities never seen.
    fn load_nonce(&self, identity: &Address) -> Result<u64, RegistryError> {
        match self.get(&KeyPrefix::nonce_key(identity))? {
            Some(bytes) => decode_nonce(&bytes),
            None => Ok(0),
        }
    }

    /// All revisions of a space in submission order.
    fn load_revisions(&self, space_id: &SpaceId) -> Result<Vec<Revision>, RegistryError> {
        let mut revisions = self
            .prefix_scan(&KeyPrefix::revisions_of(space_id))?
            .into_iter()
            .map(|(_, bytes)| decode_record::<Revision>(&bytes))
            .collect::<Result<Vec<_>, _>>()?;
        revisions.sort_by_key(|revision| revision.sequence);
        Ok(revisions)
    }
}

impl<T: KeyValueStore + ?Sized> RegistryStore for T {}

/// Recovers the identity that signed a 32-byte message.
///
/// Production: `PersonalMessageRecovery` (EIP-191 + secp256k1)
pub trait IdentityRecovery: Send + Sync {
    fn recover(&self, message: &Hash, signature: &[u8]) -> Result<Address, RecoveryError>;
}

/// Receives registry events after each committed mutation.
///
/// Called while the registry still holds its write lock, so events arrive in
/// commit order. Implementations must not call back into the registry.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: RegistryEvent);
}
