//! # Wire Format
//!
//! One JSON object per line in each direction.
//!
//! ```text
//! -> {"caller":"0x…","call":{"op":"pushRevision","spaceId":"HelloWorld","hash":"Qm…","parent":""}}
//! <- {"ok":true,"result":{"spaceId":"HelloWorld","hash":"Qm…","state":"PUBLISHED",…}}
//! <- {"ok":false,"error":{"kind":"RootAlreadyExists","message":"…"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Address, RevisionHash, SpaceId};

/// A call together with the identity executing it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallRequest {
    pub caller: Address,
    pub call: Call,
}

/// Registry operation and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Call {
    #[serde(rename_all = "camelCase")]
    CreateSpace { space_id: SpaceId, owner: Address },
    #[serde(rename_all = "camelCase")]
    GetSpace { space_id: SpaceId },
    /// `parent` absent, null or `""` submits a root revision.
    #[serde(rename_all = "camelCase")]
    PushRevision {
        space_id: SpaceId,
        hash: RevisionHash,
        #[serde(default)]
        parent: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ApproveRevision { space_id: SpaceId, hash: RevisionHash },
    #[serde(rename_all = "camelCase")]
    RejectRevision { space_id: SpaceId, hash: RevisionHash },
    #[serde(rename_all = "camelCase")]
    GetRevision { space_id: SpaceId, hash: RevisionHash },
    #[serde(rename_all = "camelCase")]
    ListRevisions { space_id: SpaceId },
    NonceOf { identity: Address },
    #[serde(rename_all = "camelCase")]
    CreationDigest {
        space_id: SpaceId,
        owner: Address,
        nonce: u64,
    },
    /// `signature` is the 65-byte r||s||v signature as hex.
    #[serde(rename_all = "camelCase")]
    DelegatedCreateSpace {
        space_id: SpaceId,
        owner: Address,
        nonce: u64,
        signature: String,
    },
}

impl Call {
    /// Operation name as it appears on the wire.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Call::CreateSpace { .. } => "createSpace",
            Call::GetSpace { .. } => "getSpace",
            Call::PushRevision { .. } => "pushRevision",
            Call::ApproveRevision { .. } => "approveRevision",
            Call::RejectRevision { .. } => "rejectRevision",
            Call::GetRevision { .. } => "getRevision",
            Call::ListRevisions { .. } => "listRevisions",
            Call::NonceOf { .. } => "nonceOf",
            Call::CreationDigest { .. } => "creationDigest",
            Call::DelegatedCreateSpace { .. } => "delegatedCreateSpace",
        }
    }
}

/// Failure description sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// Answer to one request line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl CallResponse {
    /// Successful call. A read that found nothing carries `null`.
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ErrorBody {
                kind: kind.into(),
                message: message.into(),
            }),
        }
    }

    /// Error kind of a failed call.
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.kind.as_str())
    }
}
