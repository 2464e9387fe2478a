//! # Tracing Event Publisher
//!
//! Writes every committed registry event to the log as one JSON payload.

use csr_content_registry::{EventPublisher, RegistryEvent};
use tracing::{info, warn};

/// Event sink of the node binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: RegistryEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(event = event.name(), %payload, "[csr] registry event"),
            Err(e) => warn!(event = event.name(), error = %e, "[csr] failed to encode event"),
        }
    }
}
