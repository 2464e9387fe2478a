//! # Registry Container
//!
//! Wires the registry service to the adapters selected by `NodeConfig`.

pub mod config;

pub use config::{ConfigError, LoggingConfig, NodeConfig, StorageBackend, StorageConfig};

use crate::adapters::{NodeStore, StoreOpenError, TracingEventPublisher};
use csr_content_registry::{PersonalMessageRecovery, RegistryService};
use tracing::{info, instrument};

/// Registry as hosted by the node binary.
pub type NodeRegistry = RegistryService<NodeStore, PersonalMessageRecovery, TracingEventPublisher>;

/// Open the configured store and build the registry on top of it.
#[instrument(skip_all, fields(backend = %config.storage.backend))]
pub fn build_registry(config: &NodeConfig) -> Result<NodeRegistry, StoreOpenError> {
    let store = NodeStore::open(&config.storage)?;
    info!(
        data_dir = %config.storage.data_dir.display(),
        sync_writes = config.storage.sync_writes,
        "[csr] store ready"
    );

    Ok(RegistryService::new(
        store,
        PersonalMessageRecovery::new(),
        TracingEventPublisher,
        config.registry.clone(),
    ))
}
