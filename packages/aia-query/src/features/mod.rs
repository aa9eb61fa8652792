//! Feature modules
//!
//! ```text
//! query_engine ──▶ entity_model ──▶ catalog
//! ```

pub mod catalog;
pub mod entity_model;
pub mod query_engine;
