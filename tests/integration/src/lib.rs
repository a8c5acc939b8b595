//! Integration test utilities for the blog server
//!
//! This crate provides helpers for running end-to-end tests against
//! a server bound to a random local port.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
