//! # Registry Node Runtime
//!
//! Hosts one content-space registry instance. The main entry point is the
//! `csr-node` binary; the modules are exposed for testing.
//!
//! ## Modules
//!
//! - `container` - configuration and registry wiring
//! - `adapters` - store backends and the event sink
//! - `handlers` - JSON-lines call execution

#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod container;
pub mod handlers;

pub use adapters::{NodeStore, StoreOpenError, TracingEventPublisher};
pub use container::{build_registry, ConfigError, NodeConfig, NodeRegistry};
pub use handlers::{CallHandler, CallRequest, CallResponse};
