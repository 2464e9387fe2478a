//! # Domain Entities
//!
//! Stored records of the registry and the revision approval state machine.
//!
//! ```text
//!            owner submits
//!   ┌──────────────────────────────────┐
//!   │                                  ▼
//! submit ──► PENDING ──approve──► PUBLISHED
//!               │
//!               └────reject────► REJECTED
//! ```
//!
//! Both PUBLISHED and REJECTED are terminal.

use super::errors::RegistryError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_types::{Address, RevisionHash, SpaceId};
use std::fmt;

// =============================================================================
// REVISION STATE
// =============================================================================

/// Moderation state of a revision.
///
/// Numeric codes are stable and part of the external contract: stored
/// records carry the code, JSON carries the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RevisionState {
    /// Awaiting the owner's decision.
    Pending = 0,
    /// Refused by the owner.
    Rejected = 1,
    /// Accepted, either directly (owner-authored) or by approval.
    Published = 2,
}

impl RevisionState {
    /// Stable numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RevisionState::Pending),
            1 => Some(RevisionState::Rejected),
            2 => Some(RevisionState::Published),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, RevisionState::Pending)
    }

    /// Move to `next`, refusing every edge outside `PENDING -> {PUBLISHED, REJECTED}`.
    pub fn transition(self, next: RevisionState) -> Result<RevisionState, RegistryError> {
        if self.is_terminal() || !next.is_terminal() {
            return Err(RegistryError::NotPending { state: self });
        }
        Ok(next)
    }

    /// Parse a JSON label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PENDING" => Some(RevisionState::Pending),
            "REJECTED" => Some(RevisionState::Rejected),
            "PUBLISHED" => Some(RevisionState::Published),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RevisionState::Pending => "PENDING",
            RevisionState::Rejected => "REJECTED",
            RevisionState::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for RevisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RevisionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.label())
        } else {
            serializer.serialize_u8(self.code())
        }
    }
}

impl<'de> Deserialize<'de> for RevisionState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let label = String::deserialize(deserializer)?;
            Self::from_label(&label)
                .ok_or_else(|| D::Error::custom(format!("unknown revision state '{label}'")))
        } else {
            let code = u8::deserialize(deserializer)?;
            Self::from_code(code)
                .ok_or_else(|| D::Error::custom(format!("unknown revision state code {code}")))
        }
    }
}

// =============================================================================
// SPACE
// =============================================================================

/// A named content space with a single immutable owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: SpaceId,
    pub owner: Address,
    /// Hash of the most recently published revision.
    pub last_revision: Option<RevisionHash>,
    /// First revision ever recorded; set once.
    pub root_revision: Option<RevisionHash>,
    /// Revisions recorded in any state.
    pub revision_count: u64,
}

impl Space {
    /// A freshly created space with no revisions.
    #[must_use]
    pub fn new(id: SpaceId, owner: Address) -> Self {
        Self {
            id,
            owner,
            last_revision: None,
            root_revision: None,
            revision_count: 0,
        }
    }

    #[must_use]
    pub fn is_owner(&self, identity: &Address) -> bool {
        self.owner == *identity
    }

    #[must_use]
    pub fn has_root(&self) -> bool {
        self.root_revision.is_some()
    }
}

// =============================================================================
// REVISION
// =============================================================================

/// A submitted revision of a space's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub space_id: SpaceId,
    pub hash: RevisionHash,
    pub parent: Option<RevisionHash>,
    pub author: Address,
    pub state: RevisionState,
    /// Submission order within the space, starting at zero.
    pub sequence: u64,
}

impl Revision {
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
