//! # Content-Space Registry Node
//!
//! Reads one JSON call per line from stdin and answers each on stdout.
//! Logs go to stderr.
//!
//! ## Usage
//!
//! ```text
//! CSR_REGISTRY_ADDRESS=0x… CSR_STORAGE_BACKEND=rocksdb csr-node < calls.jsonl
//! ```

use anyhow::{Context, Result};
use csr_node_runtime::{build_registry, CallHandler, NodeConfig};
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("Invalid log filter '{}'", config.logging.filter))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    if let Err(e) = config.validate_for_production() {
        warn!("[csr] configuration not production ready: {e}");
    }

    let registry = build_registry(&config).context("Failed to open registry store")?;
    info!(
        registry = %config.registry.registry_address,
        backend = %config.storage.backend,
        "[csr] node started"
    );

    let handler = CallHandler::new(registry);
    let served = handler
        .run(BufReader::new(stdin()), stdout())
        .await
        .context("Call loop failed")?;

    info!(served, "[csr] node stopped");
    Ok(())
}
