//! # Registry Service
//!
//! The application service implementing `ContentRegistryApi`.
//!
//! ## Architecture
//!
//! Every mutation runs the same pipeline under the store's write lock:
//! 1. Load the records it touches
//! 2. Validate caller authority and invariants
//! 3. Commit all writes in one atomic batch
//! 4. Publish events (still under the lock, so they follow commit order)
//!
//! A refused call returns before step 3, so nothing is ever partially written.

use crate::domain::codec::{encode_nonce, encode_record};
use crate::domain::digest;
use crate::domain::entities::{Revision, RevisionState, Space};
use crate::domain::errors::RegistryError;
use crate::domain::events::RegistryEvent;
use crate::domain::value_objects::{KeyPrefix, RegistryConfig};
use crate::ports::inbound::ContentRegistryApi;
use crate::ports::outbound::{
    BatchOperation, EventPublisher, IdentityRecovery, KeyValueStore, RegistryStore,
};
use parking_lot::RwLock;
use shared_types::{Address, Hash, RevisionHash, SpaceId};
use tracing::{debug, info, instrument, warn};

/// The content-space registry.
pub struct RegistryService<S, R, P>
where
    S: KeyValueStore,
    R: IdentityRecovery,
    P: EventPublisher,
{
    /// Registry configuration.
    config: RegistryConfig,
    /// Persistent store, owned by this instance.
    store: RwLock<S>,
    /// Signer recovery for delegated creation.
    recovery: R,
    /// Event sink.
    events: P,
}

impl<S, R, P> RegistryService<S, R, P>
where
    S: KeyValueStore,
    R: IdentityRecovery,
    P: EventPublisher,
{
    /// Create a registry over `store`.
    pub fn new(store: S, recovery: R, events: P, config: RegistryConfig) -> Self {
        info!(
            registry = %config.registry_address,
            "[csr] content registry initialized"
        );
        Self {
            config,
            store: RwLock::new(store),
            recovery,
            events,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.events
    }

    /// Give the store back, e.g. to close a database handle.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    /// Build a new space record, refusing ids that already have an owner.
    fn stage_space(store: &S, space_id: SpaceId, owner: Address) -> Result<Space, RegistryError> {
        if store.exists(&KeyPrefix::space_key(&space_id))? {
            return Err(RegistryError::AlreadyExists { space_id });
        }
        Ok(Space::new(space_id, owner))
    }

    fn try_create_space(
        store: &mut S,
        space_id: SpaceId,
        owner: Address,
    ) -> Result<Space, RegistryError> {
        let space = Self::stage_space(store, space_id, owner)?;
        store.atomic_batch_write(vec![BatchOperation::put(
            KeyPrefix::space_key(&space_id),
            encode_record(&space)?,
        )])?;
        Ok(space)
    }

    fn try_push_revision(
        store: &mut S,
        space_id: SpaceId,
        hash: &RevisionHash,
        parent: Option<RevisionHash>,
        author: Address,
    ) -> Result<Revision, RegistryError> {
        let mut space = store
            .load_space(&space_id)?
            .ok_or(RegistryError::SpaceNotFound { space_id })?;
        if store.revision_exists(&space_id, hash)? {
            return Err(RegistryError::RevisionExists {
                space_id,
                hash: hash.clone(),
            });
        }
        match &parent {
            Some(parent) => {
                if !store.revision_exists(&space_id, parent)? {
                    return Err(RegistryError::ParentNotFound {
                        space_id,
                        parent: parent.clone(),
                    });
                }
            }
            None => {
                if space.has_root() {
                    return Err(RegistryError::RootAlreadyExists { space_id });
                }
            }
        }

        let state = if space.is_owner(&author) {
            RevisionState::Published
        } else {
            RevisionState::Pending
        };
        let revision = Revision {
            space_id,
            hash: hash.clone(),
            parent,
            author,
            state,
            sequence: space.revision_count,
        };

        space.revision_count += 1;
        if space.root_revision.is_none() {
            space.root_revision = Some(hash.clone());
        }
        if state == RevisionState::Published {
            space.last_revision = Some(hash.clone());
        }

        store.atomic_batch_write(vec![
            BatchOperation::put(
                KeyPrefix::revision_key(&space_id, hash),
                encode_record(&revision)?,
            ),
            BatchOperation::put(KeyPrefix::space_key(&space_id), encode_record(&space)?),
        ])?;
        Ok(revision)
    }

    fn try_delegated_create(
        &self,
        store: &mut S,
        space_id: SpaceId,
        owner: Address,
        nonce: u64,
        signature: &[u8],
    ) -> Result<Space, RegistryError> {
        let current = store.load_nonce(&owner)?;
        if nonce != current {
            return Err(RegistryError::NonceMismatch {
                expected: current,
                provided: nonce,
            });
        }
        let next = current
            .checked_add(1)
            .ok_or(RegistryError::NonceExhausted { identity: owner })?;

        let message = self.creation_digest(&space_id, &owner, nonce);
        let signer = self.recovery.recover(&message, signature)?;
        if signer != owner {
            return Err(RegistryError::InvalidSignature {
                reason: format!("signed by {signer}, not by owner {owner}"),
            });
        }

        // Space and nonce commit together: a failed creation leaves the
        // signature usable for a retry.
        let space = Self::stage_space(store, space_id, owner)?;
        store.atomic_batch_write(vec![
            BatchOperation::put(KeyPrefix::space_key(&space_id), encode_record(&space)?),
            BatchOperation::put(KeyPrefix::nonce_key(&owner), encode_nonce(next)),
        ])?;
        Ok(space)
    }

    /// Shared path of approve and reject.
    fn moderate(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        caller: Address,
        next: RevisionState,
    ) -> Result<Revision, RegistryError> {
        let mut store = self.store.write();

        let mut space = store
            .load_space(&space_id)?
            .ok_or(RegistryError::SpaceNotFound { space_id })?;
        let mut revision = store.load_revision(&space_id, &hash)?.ok_or_else(|| {
            RegistryError::RevisionNotFound {
                space_id,
                hash: hash.clone(),
            }
        })?;
        if !space.is_owner(&caller) {
            return Err(RegistryError::Unauthorized {
                caller,
                owner: space.owner,
            });
        }
        revision.state = revision.state.transition(next)?;

        let mut batch = vec![BatchOperation::put(
            KeyPrefix::revision_key(&space_id, &hash),
            encode_record(&revision)?,
        )];
        if revision.state == RevisionState::Published {
            space.last_revision = Some(hash.clone());
            batch.push(BatchOperation::put(
                KeyPrefix::space_key(&space_id),
                encode_record(&space)?,
            ));
        }
        store.atomic_batch_write(batch)?;

        info!(state = %revision.state, "[csr] revision moderated");
        let event = match revision.state {
            RevisionState::Published => RegistryEvent::RevisionPublished {
                space_id,
                hash,
                author: revision.author,
            },
            _ => RegistryEvent::RevisionRejected {
                space_id,
                hash,
                author: revision.author,
            },
        };
        self.events.publish(event);
        Ok(revision)
    }
}

/// Log a refused call at the level its kind deserves and hand the error back.
fn refused(operation: &'static str, err: RegistryError) -> RegistryError {
    match err {
        RegistryError::Storage(_) | RegistryError::Codec { .. } => {
            warn!(operation, kind = err.kind(), error = %err, "[csr] registry call failed")
        }
        RegistryError::Unauthorized { .. }
        | RegistryError::InvalidSignature { .. }
        | RegistryError::NonceMismatch { .. }
        | RegistryError::NonceExhausted { .. } => {
            warn!(operation, kind = err.kind(), error = %err, "[csr] registry call refused")
        }
        _ => debug!(operation, kind = err.kind(), error = %err, "[csr] registry call refused"),
    }
    err
}

impl<S, R, P> ContentRegistryApi for RegistryService<S, R, P>
where
    S: KeyValueStore,
    R: IdentityRecovery,
    P: EventPublisher,
{
    #[instrument(skip_all, fields(space = %space_id, owner = %owner, caller = %caller))]
    fn create_space(
        &self,
        space_id: SpaceId,
        owner: Address,
        caller: Address,
    ) -> Result<Space, RegistryError> {
        let mut store = self.store.write();
        let space = Self::try_create_space(&mut store, space_id, owner)
            .map_err(|e| refused("createSpace", e))?;

        info!("[csr] space created");
        self.events.publish(RegistryEvent::SpaceCreated {
            space_id,
            owner,
            relayed_by: None,
        });
        Ok(space)
    }

    fn get_space(&self, space_id: &SpaceId) -> Result<Option<Space>, RegistryError> {
        self.store.read().load_space(space_id)
    }

    #[instrument(skip_all, fields(space = %space_id, hash = %hash, author = %author))]
    fn push_revision(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        parent: Option<RevisionHash>,
        author: Address,
    ) -> Result<Revision, RegistryError> {
        let mut store = self.store.write();
        let revision = Self::try_push_revision(&mut store, space_id, &hash, parent, author)
            .map_err(|e| refused("pushRevision", e))?;

        info!(state = %revision.state, "[csr] revision recorded");
        let event = match revision.state {
            RevisionState::Published => RegistryEvent::RevisionPublished {
                space_id,
                hash,
                author,
            },
            _ => RegistryEvent::RevisionPending {
                space_id,
                hash,
                author,
            },
        };
        self.events.publish(event);
        Ok(revision)
    }

    #[instrument(skip_all, fields(space = %space_id, hash = %hash, caller = %caller))]
    fn approve_revision(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        caller: Address,
    ) -> Result<Revision, RegistryError> {
        self.moderate(space_id, hash, caller, RevisionState::Published)
            .map_err(|e| refused("approveRevision", e))
    }

    #[instrument(skip_all, fields(space = %space_id, hash = %hash, caller = %caller))]
    fn reject_revision(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        caller: Address,
    ) -> Result<Revision, RegistryError> {
        self.moderate(space_id, hash, caller, RevisionState::Rejected)
            .map_err(|e| refused("rejectRevision", e))
    }

    fn get_revision(
        &self,
        space_id: &SpaceId,
        hash: &RevisionHash,
    ) -> Result<Option<Revision>, RegistryError> {
        self.store.read().load_revision(space_id, hash)
    }

    fn list_revisions(&self, space_id: &SpaceId) -> Result<Vec<Revision>, RegistryError> {
        let store = self.store.read();
        if store.load_space(space_id)?.is_none() {
            return Err(RegistryError::SpaceNotFound {
                space_id: *space_id,
            });
        }
        store.load_revisions(space_id)
    }

    fn nonce_of(&self, identity: &Address) -> Result<u64, RegistryError> {
        self.store.read().load_nonce(identity)
    }

    fn creation_digest(&self, space_id: &SpaceId, owner: &Address, nonce: u64) -> Hash {
        digest::creation_digest(&self.config.registry_address, space_id, owner, nonce)
    }

    #[instrument(skip_all, fields(space = %space_id, owner = %owner, nonce = nonce, relayer = %caller))]
    fn delegated_create_space(
        &self,
        space_id: SpaceId,
        owner: Address,
        nonce: u64,
        signature: &[u8],
        caller: Address,
    ) -> Result<Space, RegistryError> {
        let mut store = self.store.write();
        let space = self
            .try_delegated_create(&mut store, space_id, owner, nonce, signature)
            .map_err(|e| refused("delegatedCreateSpace", e))?;

        info!(nonce, "[csr] space created by delegation");
        self.events.publish(RegistryEvent::SpaceCreated {
            space_id,
            owner,
            relayed_by: Some(caller),
        });
        self.events.publish(RegistryEvent::NonceConsumed {
            identity: owner,
            nonce,
        });
        Ok(space)
    }
}
