//! aia-query: structured queries over App Inventor project trees
//!
//! A loader hands the crate a fully populated [`Project`] (screens, designer
//! components, blocks) together with the component and block catalogs. The
//! query engine then answers questions such as "how many buttons live inside
//! arrangements" or "how deep is the deepest event handler":
//!
//! ```ignore
//! use aia_query::prelude::*;
//!
//! let ctx = QueryContext::new(&project);
//! let button = project.component_type("Button")?;
//! let nested = ctx
//!     .components()
//!     .select(A::type_().eq(arrangement))
//!     .descendants_matching(button)
//!     .count()?;
//! ```
//!
//! # Module Structure
//! ```text
//! features/
//!   catalog/       ComponentType / BlockType catalogs (identity-bearing)
//!   entity_model/  Project, Screen, Component, Block, builders
//!   query_engine/  filter algebra, attribute resolver, selection, aggregation
//! config/          QueryConfig, presets, YAML I/O
//! errors.rs        QueryError + Result alias
//! ```

pub mod config;
pub mod errors;
pub mod features;

pub use errors::{QueryError, Result};

/// Everything needed to build a model and run queries against it.
pub mod prelude {
    pub use crate::config::{CallerScope, Preset, QueryConfig, UnresolvedGroups};
    pub use crate::errors::{QueryError, Result};
    pub use crate::features::catalog::{
        BlockCatalog, BlockCategory, BlockKind, BlockType, ComponentCatalog, ComponentType,
    };
    pub use crate::features::entity_model::{
        Block, BlockDef, Component, ComponentDef, EntityKey, EntityKind, EntityRef, Project,
        ProjectBuilder, Screen, ScreenBuilder,
    };
    pub use crate::features::query_engine::application::{QueryRoot, Terminal};
    pub use crate::features::query_engine::{
        AggregationBuilder, AttrHandle, Attribute, CmpOp, Expr, GroupBy, GroupCounts, Grouped,
        QueryContext, QueryRequest, QueryResult, QueryUseCase, QueryUseCaseImpl, Selection,
        TypeRef, Value, A,
    };
}
