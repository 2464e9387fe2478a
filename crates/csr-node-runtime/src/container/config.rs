//! # Node Configuration
//!
//! Unified configuration for the registry, its store and logging.
//!
//! ## Environment
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `CSR_REGISTRY_ADDRESS` | domain constant of creation digests | zero address |
//! | `CSR_STORAGE_BACKEND` | `memory` or `rocksdb` | `memory` |
//! | `CSR_DATA_DIR` | RocksDB directory | `./data/registry` |
//! | `CSR_SYNC_WRITES` | fsync every batch | `true` |
//! | `CSR_LOG_LEVEL` / `RUST_LOG` | tracing filter | `info` |
//!
//! ## Security Requirements
//!
//! - `registry_address` MUST NOT be the zero address in production

use csr_content_registry::RegistryConfig;
use shared_types::Address;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_REGISTRY_ADDRESS: &str = "CSR_REGISTRY_ADDRESS";
pub const ENV_STORAGE_BACKEND: &str = "CSR_STORAGE_BACKEND";
pub const ENV_DATA_DIR: &str = "CSR_DATA_DIR";
pub const ENV_SYNC_WRITES: &str = "CSR_SYNC_WRITES";
pub const ENV_LOG_LEVEL: &str = "CSR_LOG_LEVEL";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    /// Registry configuration.
    pub registry: RegistryConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable source; unset variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NodeConfig::default();

        if let Some(value) = lookup(ENV_REGISTRY_ADDRESS) {
            config.registry.registry_address =
                Address::from_str(value.trim()).map_err(|e| ConfigError::InvalidValue {
                    var: ENV_REGISTRY_ADDRESS,
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(value) = lookup(ENV_STORAGE_BACKEND) {
            config.storage.backend = value.parse()?;
        }
        if let Some(value) = lookup(ENV_DATA_DIR) {
            config.storage.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_SYNC_WRITES) {
            config.storage.sync_writes = parse_bool(ENV_SYNC_WRITES, &value)?;
        }
        if let Some(filter) = lookup(ENV_LOG_LEVEL).or_else(|| lookup(ENV_RUST_LOG)) {
            config.logging.filter = filter;
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the registry address is the zero address
    /// - the store is the in-memory backend
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.registry.registry_address.is_zero() {
            return Err(ConfigError::ZeroRegistryAddress);
        }
        if self.storage.backend == StorageBackend::Memory {
            return Err(ConfigError::EphemeralStorage);
        }
        Ok(())
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid {var}='{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Registry address is not set (zero value).
    #[error(
        "SECURITY VIOLATION: registry address is the zero address. \
         Set CSR_REGISTRY_ADDRESS so signatures are bound to this deployment."
    )]
    ZeroRegistryAddress,

    /// Production nodes must persist their state.
    #[error("in-memory storage loses all spaces on restart; set CSR_STORAGE_BACKEND=rocksdb")]
    EphemeralStorage,

    /// The selected backend was not compiled in.
    #[error("storage backend '{0}' is not available in this build")]
    BackendUnavailable(StorageBackend),
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Volatile in-process store.
    #[default]
    Memory,
    /// RocksDB on disk (feature `rocksdb`).
    RocksDb,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => f.write_str("memory"),
            StorageBackend::RocksDb => f.write_str("rocksdb"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "rocksdb" | "rocks" => Ok(StorageBackend::RocksDb),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_STORAGE_BACKEND,
                value: s.to_string(),
                reason: "expected memory or rocksdb".to_string(),
            }),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend to open.
    pub backend: StorageBackend,
    /// Data directory for RocksDB.
    pub data_dir: PathBuf,
    /// fsync after each batch.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data/registry"),
            sync_writes: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
