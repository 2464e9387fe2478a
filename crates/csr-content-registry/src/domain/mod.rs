//! # Domain Layer
//!
//! Pure registry logic: records, the revision state machine, the key
//! layout and the creation digest. No I/O.

pub mod codec;
pub mod digest;
pub mod entities;
pub mod errors;
pub mod events;
pub mod value_objects;
