//! Query Engine Application Layer (UseCase)
//!
//! Clean entry point for callers that want timed, validated queries without
//! managing a `QueryContext` themselves.
//!
//! # Architecture
//! ```text
//! External callers
//!           ↓
//! application/ (this module)
//!           ↓
//! context + selection + aggregation
//!           ↓
//! domain/ (expressions, values) + infrastructure/ (resolver, index)
//! ```

mod query_usecase;

pub use query_usecase::{
    ProjectSummary, QueryOutput, QueryRequest, QueryResult, QueryRoot, QueryStats, QueryStep,
    QueryUseCase, QueryUseCaseImpl, Terminal,
};
