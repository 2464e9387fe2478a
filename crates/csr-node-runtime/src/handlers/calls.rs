//! # Call Handler
//!
//! Executes wire requests against a `ContentRegistryApi`, strictly one at a
//! time and in input order.
//!
//! ## Call Flow
//!
//! ```text
//! stdin line ──parse──▶ CallRequest ──execute──▶ registry ──▶ CallResponse ──▶ stdout line
//!      │                                            │
//!      └─ MalformedRequest                          └─ RegistryError kind
//! ```
//!
//! A bad line is answered with an error and never stops the loop.

use super::wire::{Call, CallRequest, CallResponse};
use csr_content_registry::{ContentRegistryApi, RegistryError};
use serde::Serialize;
use serde_json::Value;
use shared_types::RevisionHash;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

/// Why a request line produced no result.
#[derive(Debug, Error)]
pub enum CallError {
    /// The line is not a valid request.
    #[error("malformed request: {0}")]
    Malformed(String),

    /// The registry refused the call.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The result could not be encoded.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CallError {
    /// Error kind reported on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Malformed(_) => "MalformedRequest",
            CallError::Registry(err) => err.kind(),
            CallError::Encode(_) => "Internal",
        }
    }
}

impl From<&CallError> for CallResponse {
    fn from(err: &CallError) -> Self {
        CallResponse::failure(err.kind(), err.to_string())
    }
}

/// Line-oriented front end of the registry.
pub struct CallHandler<A> {
    registry: A,
}

impl<A: ContentRegistryApi> CallHandler<A> {
    pub fn new(registry: A) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &A {
        &self.registry
    }

    /// Parse one request line.
    pub fn parse(line: &str) -> Result<CallRequest, CallError> {
        serde_json::from_str(line).map_err(|e| CallError::Malformed(e.to_string()))
    }

    /// Answer one request line.
    pub fn handle_line(&self, line: &str) -> CallResponse {
        match Self::parse(line).and_then(|request| self.execute(request)) {
            Ok(result) => CallResponse::success(result),
            Err(err) => CallResponse::from(&err),
        }
    }

    /// Execute a parsed request and encode its result.
    pub fn execute(&self, request: CallRequest) -> Result<Value, CallError> {
        let caller = request.caller;
        debug!(op = request.call.name(), caller = %caller, "[csr] executing call");

        match request.call {
            Call::CreateSpace { space_id, owner } => {
                encode(self.registry.create_space(space_id, owner, caller)?)
            }
            Call::GetSpace { space_id } => encode(self.registry.get_space(&space_id)?),
            Call::PushRevision {
                space_id,
                hash,
                parent,
            } => {
                let parent = match parent {
                    Some(parent) => RevisionHash::optional(&parent)
                        .map_err(|e| CallError::Malformed(format!("parent: {e}")))?,
                    None => None,
                };
                encode(self.registry.push_revision(space_id, hash, parent, caller)?)
            }
            Call::ApproveRevision { space_id, hash } => {
                encode(self.registry.approve_revision(space_id, hash, caller)?)
            }
            Call::RejectRevision { space_id, hash } => {
                encode(self.registry.reject_revision(space_id, hash, caller)?)
            }
            Call::GetRevision { space_id, hash } => {
                encode(self.registry.get_revision(&space_id, &hash)?)
            }
            Call::ListRevisions { space_id } => encode(self.registry.list_revisions(&space_id)?),
            Call::NonceOf { identity } => encode(self.registry.nonce_of(&identity)?),
            Call::CreationDigest {
                space_id,
                owner,
                nonce,
            } => encode(self.registry.creation_digest(&space_id, &owner, nonce)),
            Call::DelegatedCreateSpace {
                space_id,
                owner,
                nonce,
                signature,
            } => {
                let signature = decode_hex(&signature)
                    .map_err(|e| CallError::Malformed(format!("signature: {e}")))?;
                encode(
                    self.registry
                        .delegated_create_space(space_id, owner, nonce, &signature, caller)?,
                )
            }
        }
    }

    /// Serve requests from `reader` until end of input, writing one response
    /// line per non-blank request line. Returns the number of requests served.
    ///
    /// Lines are read as raw bytes; a line that is not UTF-8 is answered as
    /// malformed like any other bad request.
    #[instrument(skip_all, name = "call_handler")]
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("[csr] accepting calls");
        let mut buf = Vec::new();
        let mut served = 0u64;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim_end_matches(['\n', '\r'])),
                Err(e) => CallResponse::from(&CallError::Malformed(format!(
                    "request is not UTF-8: {e}"
                ))),
            };
            if response.error_kind() == Some("MalformedRequest") {
                warn!(request = served + 1, "[csr] malformed request line");
            }

            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
            served += 1;
        }

        info!(served, "[csr] input closed");
        Ok(served)
    }
}

fn encode<T: Serialize>(value: T) -> Result<Value, CallError> {
    Ok(serde_json::to_value(value)?)
}

fn decode_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    hex::decode(digits)
}
