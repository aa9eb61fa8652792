//! Shared test utilities for aia-query integration tests
//!
//! Usage:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
