//! Integration test utilities for the tapback reconciler
//!
//! This crate provides history builders and a harness that wires the
//! in-memory store, the bundled pattern catalog, and the services together.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
