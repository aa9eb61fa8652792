//! Catalog Feature - component and block type vocabularies

pub mod block_type;
pub mod component_type;
mod descriptor;
pub mod registry;
mod standard_blocks;

pub use block_type::{BlockCategory, BlockKind, BlockType};
pub use component_type::{
    BlockPropertyInfo, ComponentType, EventDecl, MethodDecl, Parameter, PropertyDecl, ReadWrite,
    CONTAINER_TYPES,
};
pub use registry::{BlockCatalog, ComponentCatalog};
