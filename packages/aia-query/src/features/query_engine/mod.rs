//! Query Engine Feature - filter algebra, selections and aggregations
//!
//! Provides a fluent API with operator overloading over the entity model.
//!
//! # Hexagonal Architecture
//! ```text
//! External callers
//!           ↓
//! application/ (UseCase - timed, validated requests)
//!           ↓
//! context / selection / aggregation (query surface)
//!           ↓
//! domain/ (values, attributes, expressions)
//!           ↓
//! infrastructure/ (attribute resolver, callers index, traversal)
//! ```
//!
//! # Usage
//! ```ignore
//! use aia_query::prelude::*;
//!
//! let ctx = QueryContext::new(&project);
//! let clicks = ctx
//!     .blocks()
//!     .select(A::top_level().eq(true))
//!     .count_by(A::event_name())?;
//! ```

pub mod aggregation;
pub mod application; // UseCase layer
pub mod context;
pub mod domain;
pub mod infrastructure;
pub mod selection;

// Re-export application layer
pub use application::{QueryOutput, QueryRequest, QueryResult, QueryUseCase, QueryUseCaseImpl};

// Re-export the query surface
pub use aggregation::{AggregationBuilder, AggregationResult, GroupBy, GroupCounts, Grouped};
pub use context::QueryContext;
pub use selection::Selection;

// Re-export domain types
pub use domain::{AttrHandle, Attribute, AttributeSlot, CmpOp, Expr, ExprEvaluator, Resolve, TypeRef, Value, A};

// Re-export infrastructure (internal use - prefer the context)
#[doc(hidden)]
pub use infrastructure::{AttributeResolver, CallerIndex, TraversalOrder};
