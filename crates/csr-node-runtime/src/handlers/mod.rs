//! # Call Handlers
//!
//! JSON-lines front end of the registry.

pub mod calls;
pub mod wire;

pub use calls::{CallError, CallHandler};
pub use wire::{Call, CallRequest, CallResponse, ErrorBody};
