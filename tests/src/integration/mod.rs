//! # Integration Tests
//!
//! Registry, signature recovery and node runtime exercised together.

pub mod delegation;
pub mod flows;
