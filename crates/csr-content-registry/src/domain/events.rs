//! # Registry Events
//!
//! Published after a mutation's batch has been committed.

use serde::{Deserialize, Serialize};
use shared_types::{Address, RevisionHash, SpaceId};

/// Notification of a committed registry change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RegistryEvent {
    /// A space was created. `relayed_by` is set for delegated creation.
    #[serde(rename_all = "camelCase")]
    SpaceCreated {
        space_id: SpaceId,
        owner: Address,
        relayed_by: Option<Address>,
    },
    /// A non-owner revision awaits moderation.
    #[serde(rename_all = "camelCase")]
    RevisionPending {
        space_id: SpaceId,
        hash: RevisionHash,
        author: Address,
    },
    /// A revision became the space's latest published revision.
    #[serde(rename_all = "camelCase")]
    RevisionPublished {
        space_id: SpaceId,
        hash: RevisionHash,
        author: Address,
    },
    /// A pending revision was refused.
    #[serde(rename_all = "camelCase")]
    RevisionRejected {
        space_id: SpaceId,
        hash: RevisionHash,
        author: Address,
    },
    /// A delegated-creation nonce was used up.
    NonceConsumed { identity: Address, nonce: u64 },
}

impl RegistryEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::SpaceCreated { .. } => "SpaceCreated",
            RegistryEvent::RevisionPending { .. } => "RevisionPending",
            RegistryEvent::RevisionPublished { .. } => "RevisionPublished",
            RegistryEvent::RevisionRejected { .. } => "RevisionRejected",
            RegistryEvent::NonceConsumed { .. } => "NonceConsumed",
        }
    }
}
