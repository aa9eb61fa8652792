//! Query UseCase Implementation
//!
//! Provides application-level interface for query operations. A request is
//! plain data (root collection, pipeline steps, terminal), so callers can
//! build it without holding a `QueryContext`.

use crate::config::QueryConfig;
use crate::errors::Result;
use crate::features::entity_model::{EntityKey, Project};
use crate::features::query_engine::aggregation::{GroupBy, GroupCounts};
use crate::features::query_engine::context::QueryContext;
use crate::features::query_engine::domain::{Attribute, Expr, Value, A};
use crate::features::query_engine::selection::Selection;
use std::time::Instant;
use tracing::{info, warn};

/// Root collection of a request
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRoot {
    Screens,
    Components,
    Blocks,
    ScreenComponents(String),
    ScreenBlocks(String),
    TopLevelBlocks(String),
}

/// One pipeline step of a request
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStep {
    Select(Expr),
    Descendants(Option<Expr>),
    /// Descendants passing the filter; failing elements hide their subtree
    PrunedDescendants(Expr),
    Callers(Option<Expr>),
}

/// What the request computes
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    Count,
    Entities,
    Values(Attribute),
    CountBy(Vec<Attribute>),
    Min(Attribute),
    Max(Attribute),
    Avg(Attribute),
    Median(Attribute),
}

/// Input for query execution
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub root: QueryRoot,
    pub steps: Vec<QueryStep>,
    pub terminal: Terminal,
}

impl QueryRequest {
    pub fn new(root: QueryRoot) -> Self {
        Self {
            root,
            steps: Vec::new(),
            terminal: Terminal::Count,
        }
    }

    pub fn select(mut self, filter: impl Into<Expr>) -> Self {
        self.steps.push(QueryStep::Select(filter.into()));
        self
    }

    pub fn descendants(mut self, filter: Option<Expr>) -> Self {
        self.steps.push(QueryStep::Descendants(filter));
        self
    }

    pub fn descendants_pruned(mut self, filter: impl Into<Expr>) -> Self {
        self.steps.push(QueryStep::PrunedDescendants(filter.into()));
        self
    }

    pub fn callers(mut self, filter: Option<Expr>) -> Self {
        self.steps.push(QueryStep::Callers(filter));
        self
    }

    pub fn terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = terminal;
        self
    }

    fn filters(&self) -> impl Iterator<Item = &Expr> {
        self.steps.iter().filter_map(|step| match step {
            QueryStep::Select(expr) | QueryStep::PrunedDescendants(expr) => Some(expr),
            QueryStep::Descendants(filter) | QueryStep::Callers(filter) => filter.as_ref(),
        })
    }
}

/// Terminal value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Count(usize),
    Entities(Vec<EntityKey>),
    Values(Vec<Value>),
    Groups(GroupCounts),
    Value(Value),
    Number(f64),
}

impl QueryResult {
    /// Number of items in the result (1 for scalars).
    pub fn len(&self) -> usize {
        match self {
            QueryResult::Entities(items) => items.len(),
            QueryResult::Values(items) => items.len(),
            QueryResult::Groups(groups) => groups.len(),
            QueryResult::Count(_) | QueryResult::Value(_) | QueryResult::Number(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output from query execution
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    pub result: QueryResult,
    pub stats: QueryStats,
}

/// Query execution statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStats {
    /// Entities produced by the root collection
    pub elements_visited: usize,
    pub result_len: usize,
    pub execution_time_ms: u64,
}

/// Whole-project overview
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub screens: usize,
    pub components: usize,
    pub blocks: usize,
    pub components_by_type: GroupCounts,
    pub blocks_by_category: GroupCounts,
}

/// Query UseCase Trait (Port)
///
/// External callers should depend on this trait.
pub trait QueryUseCase: Send + Sync {
    /// Validate and run one request.
    fn execute(&self, project: &Project, request: &QueryRequest) -> Result<QueryOutput>;

    /// Run several requests against one shared context (one callers index).
    fn execute_all(&self, project: &Project, requests: &[QueryRequest]) -> Vec<Result<QueryOutput>>;

    fn summarize(&self, project: &Project) -> Result<ProjectSummary>;
}

/// Query UseCase Implementation
#[derive(Debug, Default)]
pub struct QueryUseCaseImpl {
    config: QueryConfig,
}

impl QueryUseCaseImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QueryConfig) -> Self {
        Self { config }
    }

    fn run(&self, ctx: &QueryContext<'_>, request: &QueryRequest) -> Result<QueryOutput> {
        let start = Instant::now();

        for filter in request.filters() {
            ctx.validate_expr(filter)?;
        }

        let root = root_selection(ctx, &request.root)?;
        let elements_visited = root.source_len();
        let selection = request.steps.iter().fold(root, |selection, step| match step {
            QueryStep::Select(filter) => selection.select(filter.clone()),
            QueryStep::Descendants(None) => selection.descendants(),
            QueryStep::Descendants(Some(filter)) => selection.descendants_matching(filter.clone()),
            QueryStep::PrunedDescendants(filter) => selection.descendants_pruned(filter.clone()),
            QueryStep::Callers(None) => selection.callers(),
            QueryStep::Callers(Some(filter)) => selection.callers_matching(filter.clone()),
        });

        let result = match &request.terminal {
            Terminal::Count => QueryResult::Count(selection.count()?),
            Terminal::Entities => QueryResult::Entities(
                selection.to_vec()?.iter().map(|entity| entity.key()).collect(),
            ),
            Terminal::Values(attribute) => QueryResult::Values(selection.map(attribute.clone())?),
            Terminal::CountBy(attributes) => QueryResult::Groups(
                selection.count_by(GroupBy::new(attributes.clone()))?,
            ),
            Terminal::Min(attribute) => QueryResult::Value(selection.min(attribute.clone())?),
            Terminal::Max(attribute) => QueryResult::Value(selection.max(attribute.clone())?),
            Terminal::Avg(attribute) => QueryResult::Number(selection.avg(attribute.clone())?),
            Terminal::Median(attribute) => QueryResult::Number(selection.median(attribute.clone())?),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let stats = QueryStats {
            elements_visited,
            result_len: result.len(),
            execution_time_ms: elapsed_ms,
        };

        info!(
            root = ?request.root,
            steps = request.steps.len(),
            result_len = stats.result_len,
            elapsed_ms,
            "query executed"
        );
        if elapsed_ms > self.config.slow_query_ms {
            warn!(
                root = ?request.root,
                elapsed_ms,
                threshold_ms = self.config.slow_query_ms,
                "slow query"
            );
        }

        Ok(QueryOutput { result, stats })
    }
}

fn root_selection<'c, 'p>(ctx: &'c QueryContext<'p>, root: &QueryRoot) -> Result<Selection<'c, 'p>> {
    match root {
        QueryRoot::Screens => Ok(ctx.screens()),
        QueryRoot::Components => Ok(ctx.components()),
        QueryRoot::Blocks => Ok(ctx.blocks()),
        QueryRoot::ScreenComponents(screen) => ctx.screen_components(screen),
        QueryRoot::ScreenBlocks(screen) => ctx.screen_blocks(screen),
        QueryRoot::TopLevelBlocks(screen) => ctx.top_level_blocks(screen),
    }
}

impl QueryUseCase for QueryUseCaseImpl {
    fn execute(&self, project: &Project, request: &QueryRequest) -> Result<QueryOutput> {
        let ctx = QueryContext::with_config(project, self.config.clone());
        self.run(&ctx, request)
    }

    fn execute_all(&self, project: &Project, requests: &[QueryRequest]) -> Vec<Result<QueryOutput>> {
        let ctx = QueryContext::with_config(project, self.config.clone());
        requests.iter().map(|request| self.run(&ctx, request)).collect()
    }

    fn summarize(&self, project: &Project) -> Result<ProjectSummary> {
        let start = Instant::now();
        let ctx = QueryContext::with_config(project, self.config.clone());
        let summary = ProjectSummary {
            screens: project.screen_count(),
            components: project.component_count(),
            blocks: project.block_count(),
            components_by_type: ctx.components().count_by(A::type_())?,
            blocks_by_category: ctx.blocks().count_by(A::category())?,
        };
        info!(
            project = project.name(),
            screens = summary.screens,
            components = summary.components,
            blocks = summary.blocks,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "project summarized"
        );
        Ok(summary)
    }
}
