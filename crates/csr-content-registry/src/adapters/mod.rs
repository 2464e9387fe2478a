//! # Adapters Module
//!
//! In-process implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: in-memory `KeyValueStore`
//! - `recovery`: EIP-191 personal-message signer recovery
//! - `events`: event log and no-op publisher

pub mod events;
pub mod recovery;
pub mod storage;

pub use events::{InMemoryEventLog, NoopEventPublisher};
pub use recovery::PersonalMessageRecovery;
pub use storage::InMemoryKvStore;
