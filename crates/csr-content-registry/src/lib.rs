//! # Content-Space Registry
//!
//! Tracks named content spaces, each owned by a single identity, and the
//! hash-linked chain of revisions published under them.
//!
//! ## Components
//!
//! | Component | Responsibility |
//! |-----------|----------------|
//! | Space Directory | space id -> owner and latest published revision |
//! | Revision Ledger | (space, hash) -> revision and its approval state |
//! | Delegated Authorization | nonce-bound signatures let a relayer create a space for its owner |
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique spaces | A space id is created at most once; the owner never changes |
//! | Unique revisions | (space, hash) is recorded at most once |
//! | Linked chain | A parent must already be recorded in the same space |
//! | Single root | Only the first revision of a space may be parentless |
//! | Moderation | Non-owner revisions start PENDING; only the owner decides |
//! | Terminal states | PUBLISHED and REJECTED never change again |
//! | Replay protection | Each signed nonce authorizes at most one creation |
//! | Atomic writes | A refused call writes nothing |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Records, state machine, key layout, creation digest
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - In-memory store, signer recovery, event sinks
//! - `service.rs` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use csr_content_registry::*;
//!
//! let registry = RegistryService::new(
//!     InMemoryKvStore::new(),
//!     PersonalMessageRecovery::new(),
//!     NoopEventPublisher,
//!     RegistryConfig::default(),
//! );
//! registry.create_space(space_id, owner, owner)?;
//! registry.push_revision(space_id, hash, None, owner)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{InMemoryEventLog, InMemoryKvStore, NoopEventPublisher, PersonalMessageRecovery};
pub use domain::digest::creation_digest;
pub use domain::entities::{Revision, RevisionState, Space};
pub use domain::errors::{KvStoreError, RecoveryError, RegistryError};
pub use domain::events::RegistryEvent;
pub use domain::value_objects::{KeyPrefix, RegistryConfig};
pub use ports::inbound::ContentRegistryApi;
pub use ports::outbound::{
    BatchOperation, EventPublisher, IdentityRecovery, KeyValueStore, RegistryStore, ScanResult,
};
pub use service::RegistryService;
