//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the content registry.
//!
//! Every mutating call takes the caller explicitly; the registry never
//! infers identity from ambient state.

use crate::domain::entities::{Revision, Space};
use crate::domain::errors::RegistryError;
use shared_types::{Address, Hash, RevisionHash, SpaceId};

/// Primary API of the registry.
///
/// Implementations must enforce all domain invariants and must leave the
/// store untouched when a call fails.
pub trait ContentRegistryApi {
    // === Space Directory ===

    /// Register `space_id` with `owner`. Any caller may register any owner.
    ///
    /// ## Errors
    ///
    /// - `AlreadyExists`: the id already has an owner
    fn create_space(
        &self,
        space_id: SpaceId,
        owner: Address,
        caller: Address,
    ) -> Result<Space, RegistryError>;

    /// Look up a space.
    fn get_space(&self, space_id: &SpaceId) -> Result<Option<Space>, RegistryError>;

    // === Revision Ledger ===

    /// Submit a revision. Owner submissions publish immediately, all
    /// others wait for moderation.
    ///
    /// ## Errors
    ///
    /// - `SpaceNotFound`: the space does not exist
    /// - `RevisionExists`: the hash is already recorded in the space
    /// - `ParentNotFound`: the parent is not recorded in the space
    /// - `RootAlreadyExists`: parentless submission to a space with a root
    fn push_revision(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        parent: Option<RevisionHash>,
        author: Address,
    ) -> Result<Revision, RegistryError>;

    /// Publish a pending revision and make it the space's latest.
    ///
    /// ## Errors
    ///
    /// Checked in order: `SpaceNotFound`, `RevisionNotFound`,
    /// `Unauthorized`, `NotPending`.
    fn approve_revision(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        caller: Address,
    ) -> Result<Revision, RegistryError>;

    /// Reject a pending revision. The space's latest revision is untouched.
    ///
    /// ## Errors
    ///
    /// Same as `approve_revision`.
    fn reject_revision(
        &self,
        space_id: SpaceId,
        hash: RevisionHash,
        caller: Address,
    ) -> Result<Revision, RegistryError>;

    /// Look up a revision.
    fn get_revision(
        &self,
        space_id: &SpaceId,
        hash: &RevisionHash,
    ) -> Result<Option<Revision>, RegistryError>;

    /// Every revision of a space in submission order.
    ///
    /// ## Errors
    ///
    /// - `SpaceNotFound`: the space does not exist
    fn list_revisions(&self, space_id: &SpaceId) -> Result<Vec<Revision>, RegistryError>;

    // === Delegated Authorization ===

    /// Current delegated-creation nonce of `identity`.
    fn nonce_of(&self, identity: &Address) -> Result<u64, RegistryError>;

    /// Digest the owner signs to authorize a relayed creation.
    fn creation_digest(&self, space_id: &SpaceId, owner: &Address, nonce: u64) -> Hash;

    /// Create a space on behalf of `owner`, authorized by their signature
    /// over `creation_digest(space_id, owner, nonce)`.
    ///
    /// ## Errors
    ///
    /// - `NonceMismatch`: `nonce` is not the owner's current nonce
    /// - `NonceExhausted`: the owner's nonce is at `u64::MAX`
    /// - `InvalidSignature`: malformed, or not signed by `owner`
    /// - `AlreadyExists`: the nonce is left unconsumed
    fn delegated_create_space(
        &self,
        space_id: SpaceId,
        owner: Address,
        nonce: u64,
        signature: &[u8],
        caller: Address,
    ) -> Result<Space, RegistryError>;
}
