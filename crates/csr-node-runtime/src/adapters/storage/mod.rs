//! # Storage Adapters
//!
//! `NodeStore` picks the backend named in the configuration at startup.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature for the persistent backend:
//!
//! ```toml
//! csr-node-runtime = { path = "...", features = ["rocksdb"] }
//! ```

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

use crate::container::config::{ConfigError, StorageBackend, StorageConfig};
use csr_content_registry::{BatchOperation, InMemoryKvStore, KeyValueStore, KvStoreError, ScanResult};
use thiserror::Error;

/// Failure to open the configured store.
#[derive(Debug, Error)]
pub enum StoreOpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] KvStoreError),
}

/// The store selected by configuration.
pub enum NodeStore {
    Memory(InMemoryKvStore),
    #[cfg(feature = "rocksdb")]
    RocksDb(RocksDbStore),
}

impl NodeStore {
    /// Open the backend named in `config`.
    pub fn open(config: &StorageConfig) -> Result<Self, StoreOpenError> {
        match config.backend {
            StorageBackend::Memory => {
                tracing::warn!("[csr] using in-memory store; state is lost on exit");
                Ok(NodeStore::Memory(InMemoryKvStore::new()))
            }
            #[cfg(feature = "rocksdb")]
            StorageBackend::RocksDb => {
                let store = RocksDbStore::open(RocksDbConfig {
                    path: config.data_dir.clone(),
                    sync_writes: config.sync_writes,
                    ..Default::default()
                })?;
                Ok(NodeStore::RocksDb(store))
            }
            #[cfg(not(feature = "rocksdb"))]
            StorageBackend::RocksDb => {
                Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb).into())
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            NodeStore::Memory(_) => StorageBackend::Memory,
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(_) => StorageBackend::RocksDb,
        }
    }
}

impl KeyValueStore for NodeStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvStoreError> {
        match self {
            NodeStore::Memory(store) => store.get(key),
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(store) => store.get(key),
        }
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KvStoreError> {
        match self {
            NodeStore::Memory(store) => store.atomic_batch_write(operations),
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(store) => store.atomic_batch_write(operations),
        }
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KvStoreError> {
        match self {
            NodeStore::Memory(store) => store.exists(key),
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(store) => store.exists(key),
        }
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KvStoreError> {
        match self {
            NodeStore::Memory(store) => store.prefix_scan(prefix),
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(store) => store.prefix_scan(prefix),
        }
    }
}
