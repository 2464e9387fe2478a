//! # Node Adapters
//!
//! Outbound port implementations owned by the node:
//!
//! - `storage` - backend selection and the RocksDB store
//! - `events` - event sink writing to the log

pub mod events;
pub mod storage;

pub use events::TracingEventPublisher;
pub use storage::{NodeStore, StoreOpenError};
