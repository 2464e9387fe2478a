//! # Shared Types Crate
//!
//! Identifiers shared by every crate of the content-space registry.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, digests and space/revision
//!   identifiers are defined once here.
//! - **Fixed-width keys**: `SpaceId` has one canonical 32-byte encoding so
//!   clients and storage agree on keys.
//! - **Dual encoding**: human-readable serializers (JSON) see text forms,
//!   binary serializers (bincode) see raw bytes.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
