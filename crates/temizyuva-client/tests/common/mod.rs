//! Shared setup for the client integration tests

#![allow(dead_code, clippy::unwrap_used)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
