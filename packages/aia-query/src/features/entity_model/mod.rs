//! Entity Model Feature
//!
//! Project → Screen → (component tree, block forest). Everything is built
//! once through the builders and read-only afterwards; the types are
//! `Send + Sync`, so a project can be shared across threads.

pub mod block;
pub mod builder;
pub mod component;
pub mod entity_ref;
pub mod kind;
pub mod project;
pub mod screen;

#[cfg(test)]
pub(crate) mod fixtures;

pub use block::{Block, Reference};
pub use builder::{BlockDef, ComponentDef, ProjectBuilder, ScreenBuilder};
pub use component::Component;
pub use entity_ref::EntityRef;
pub use kind::{EntityKey, EntityKind};
pub use project::Project;
pub use screen::Screen;
