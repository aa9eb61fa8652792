// Selection - lazy, restartable entity sequences
//
// A Selection is a source collection plus a pipeline of steps (filter,
// descendants, callers, kind narrowing). Nothing is evaluated until a
// terminal operation iterates it, and every iteration re-evaluates the whole
// pipeline against the project; results are never cached.
//
// Example:
// ```ignore
// let nested_buttons = ctx
//     .components()
//     .select(arrangement)
//     .descendants_matching(button)
//     .count()?;
// ```

use super::aggregation::{self, AggregationBuilder, GroupBy, GroupCounts, Grouped};
use super::context::QueryContext;
use super::domain::{Attribute, Expr, Value};
use super::infrastructure::{Descendants, PrunedDescendants, TraversalOrder};
use crate::errors::Result;
use crate::features::entity_model::{EntityKind, EntityRef, Screen};
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

type EntityIter<'a, 'p> = Box<dyn Iterator<Item = Result<EntityRef<'p>>> + 'a>;

/// Where a selection starts
#[derive(Clone)]
pub(crate) enum Source<'p> {
    Screens,
    Components(Option<&'p Screen>),
    Blocks(Option<&'p Screen>),
    TopLevel(&'p Screen),
    Fixed(Arc<[EntityRef<'p>]>),
}

#[derive(Debug, Clone)]
enum Step {
    Filter(Arc<Expr>),
    Descendants {
        order: TraversalOrder,
        filter: Option<Arc<Expr>>,
        prune: bool,
    },
    Callers(Option<Arc<Expr>>),
    OfKind(EntityKind, Option<Arc<Expr>>),
    Screens,
}

#[derive(Clone)]
pub struct Selection<'c, 'p> {
    ctx: &'c QueryContext<'p>,
    source: Source<'p>,
    steps: Vec<Step>,
}

impl<'c, 'p> Selection<'c, 'p> {
    pub(crate) fn new(ctx: &'c QueryContext<'p>, source: Source<'p>) -> Self {
        Self {
            ctx,
            source,
            steps: Vec::new(),
        }
    }

    pub fn context(&self) -> &'c QueryContext<'p> {
        self.ctx
    }

    fn with_step(&self, step: Step) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }

    // ========================================================================
    // Pipeline steps
    // ========================================================================

    /// Elements satisfying `filter`, in order.
    pub fn select(&self, filter: impl Into<Expr>) -> Self {
        self.with_step(Step::Filter(Arc::new(filter.into())))
    }

    /// Pre-order descendants of every element, the element itself excluded.
    pub fn descendants(&self) -> Self {
        self.with_step(Step::Descendants {
            order: TraversalOrder::PreOrder,
            filter: None,
            prune: false,
        })
    }

    pub fn descendants_matching(&self, filter: impl Into<Expr>) -> Self {
        self.with_step(Step::Descendants {
            order: TraversalOrder::PreOrder,
            filter: Some(Arc::new(filter.into())),
            prune: false,
        })
    }

    /// Pre-order descendants matching `filter`; an element that fails it
    /// hides its whole subtree.
    pub fn descendants_pruned(&self, filter: impl Into<Expr>) -> Self {
        self.with_step(Step::Descendants {
            order: TraversalOrder::PreOrder,
            filter: Some(Arc::new(filter.into())),
            prune: true,
        })
    }

    pub fn descendants_breadth_first(&self, filter: Option<Expr>) -> Self {
        self.with_step(Step::Descendants {
            order: TraversalOrder::BreadthFirst,
            filter: filter.map(Arc::new),
            prune: false,
        })
    }

    /// Blocks referring to any element, each reported once.
    pub fn callers(&self) -> Self {
        self.with_step(Step::Callers(None))
    }

    pub fn callers_matching(&self, filter: impl Into<Expr>) -> Self {
        self.with_step(Step::Callers(Some(Arc::new(filter.into()))))
    }

    /// Distinct screens owning the elements.
    pub fn screens(&self) -> Self {
        self.with_step(Step::Screens)
    }

    /// Only the component elements.
    pub fn components(&self) -> Self {
        self.with_step(Step::OfKind(EntityKind::Component, None))
    }

    pub fn components_matching(&self, filter: impl Into<Expr>) -> Self {
        self.with_step(Step::OfKind(EntityKind::Component, Some(Arc::new(filter.into()))))
    }

    /// Only the block elements.
    pub fn blocks(&self) -> Self {
        self.with_step(Step::OfKind(EntityKind::Block, None))
    }

    pub fn blocks_matching(&self, filter: impl Into<Expr>) -> Self {
        self.with_step(Step::OfKind(EntityKind::Block, Some(Arc::new(filter.into()))))
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    fn source_iter(&self) -> Box<dyn Iterator<Item = EntityRef<'p>> + '_> {
        let project = self.ctx.project();
        match &self.source {
            Source::Screens => Box::new(project.screen_refs()),
            Source::Components(None) => Box::new(project.component_refs()),
            Source::Components(Some(screen)) => Box::new(screen.component_refs()),
            Source::Blocks(None) => Box::new(project.block_refs()),
            Source::Blocks(Some(screen)) => Box::new(screen.block_refs()),
            Source::TopLevel(screen) => Box::new(screen.top_level_refs()),
            Source::Fixed(entities) => Box::new(entities.iter().copied()),
        }
    }

    /// Number of entities the source collection produces.
    pub fn source_len(&self) -> usize {
        self.source_iter().count()
    }

    /// Fresh pass over the pipeline. Errors from filters and traversal are
    /// yielded in place.
    pub fn iter(&self) -> EntityIter<'_, 'p> {
        let ctx = self.ctx;
        let mut iter: EntityIter<'_, 'p> = Box::new(self.source_iter().map(Ok));
        for step in &self.steps {
            iter = match step {
                Step::Filter(expr) => Box::new(iter.filter_map(move |item| keep(ctx, Some(expr), item))),
                Step::Descendants { order, filter, prune } => {
                    let (order, prune) = (*order, *prune);
                    Box::new(
                        iter.flat_map(move |item| descendants_of(ctx, order, filter.as_ref(), prune, item)),
                    )
                }
                Step::Callers(filter) => {
                    let mut seen = FxHashSet::default();
                    Box::new(
                        iter.flat_map(move |item| callers_of(ctx, item))
                            .filter(move |item| match item {
                                Ok(entity) => seen.insert(*entity),
                                Err(_) => true,
                            })
                            .filter_map(move |item| keep(ctx, filter.as_ref(), item)),
                    )
                }
                Step::OfKind(kind, filter) => {
                    let kind = *kind;
                    Box::new(
                        iter.filter(move |item| item.as_ref().map_or(true, |e| e.kind() == kind))
                            .filter_map(move |item| keep(ctx, filter.as_ref(), item)),
                    )
                }
                Step::Screens => {
                    let mut seen = FxHashSet::default();
                    Box::new(
                        iter.map(|item| item.map(|e| e.screen().as_entity()))
                            .filter(move |item| match item {
                                Ok(screen) => seen.insert(*screen),
                                Err(_) => true,
                            }),
                    )
                }
            };
        }
        iter
    }

    // ========================================================================
    // Terminal operations
    // ========================================================================

    /// Materialize the selection.
    pub fn to_vec(&self) -> Result<Vec<EntityRef<'p>>> {
        self.iter().collect()
    }

    pub fn count(&self) -> Result<usize> {
        let mut n = 0;
        for item in self.iter() {
            item?;
            n += 1;
        }
        Ok(n)
    }

    pub fn first(&self) -> Result<Option<EntityRef<'p>>> {
        self.iter().next().transpose()
    }

    pub fn nth(&self, index: usize) -> Result<Option<EntityRef<'p>>> {
        let mut iter = self.iter();
        for _ in 0..index {
            match iter.next() {
                Some(item) => {
                    item?;
                }
                None => return Ok(None),
            }
        }
        iter.next().transpose()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.first()?.is_none())
    }

    /// Attribute values in selection order; elements without the attribute
    /// are skipped.
    pub fn map(&self, attribute: impl Into<Attribute>) -> Result<Vec<Value>> {
        aggregation::project_values(self.ctx, self.iter(), &attribute.into())
    }

    fn values(&self, attribute: impl Into<Attribute>) -> Result<Vec<Value>> {
        aggregation::collect_values(self.ctx, self.iter(), &attribute.into())
    }

    /// Group sizes keyed by one attribute or a tuple of attributes.
    pub fn count_by(&self, group: impl Into<GroupBy>) -> Result<GroupCounts> {
        aggregation::count_by(self.ctx, self.iter(), &group.into())
    }

    pub fn min(&self, attribute: impl Into<Attribute>) -> Result<Value> {
        aggregation::min_value(self.values(attribute)?)
    }

    pub fn max(&self, attribute: impl Into<Attribute>) -> Result<Value> {
        aggregation::max_value(self.values(attribute)?)
    }

    pub fn avg(&self, attribute: impl Into<Attribute>) -> Result<f64> {
        aggregation::mean(&self.values(attribute)?)
    }

    pub fn median(&self, attribute: impl Into<Attribute>) -> Result<f64> {
        aggregation::median(&self.values(attribute)?)
    }

    pub fn min_by(&self, attribute: impl Into<Attribute>, group: impl Into<GroupBy>) -> Result<Grouped<Value>> {
        aggregation::reduce_by(self.ctx, self.iter(), &attribute.into(), &group.into(), aggregation::min_value)
    }

    pub fn max_by(&self, attribute: impl Into<Attribute>, group: impl Into<GroupBy>) -> Result<Grouped<Value>> {
        aggregation::reduce_by(self.ctx, self.iter(), &attribute.into(), &group.into(), aggregation::max_value)
    }

    pub fn avg_by(&self, attribute: impl Into<Attribute>, group: impl Into<GroupBy>) -> Result<Grouped<f64>> {
        aggregation::reduce_by(self.ctx, self.iter(), &attribute.into(), &group.into(), |values| {
            aggregation::mean(&values)
        })
    }

    pub fn aggregate(&self) -> AggregationBuilder<'c, 'p> {
        AggregationBuilder::new(self.clone())
    }
}

impl fmt::Debug for Selection<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

/// Pass `item` through an optional filter.
fn keep<'p>(
    ctx: &QueryContext<'p>,
    filter: Option<&Arc<Expr>>,
    item: Result<EntityRef<'p>>,
) -> Option<Result<EntityRef<'p>>> {
    let entity = match item {
        Ok(entity) => entity,
        Err(err) => return Some(Err(err)),
    };
    match filter {
        None => Some(Ok(entity)),
        Some(expr) => match ctx.eval(expr, entity) {
            Ok(true) => Some(Ok(entity)),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        },
    }
}

fn descendants_of<'a, 'p: 'a>(
    ctx: &'a QueryContext<'p>,
    order: TraversalOrder,
    filter: Option<&'a Arc<Expr>>,
    prune: bool,
    item: Result<EntityRef<'p>>,
) -> EntityIter<'a, 'p> {
    match (item, filter) {
        (Ok(root), Some(expr)) if prune => {
            Box::new(PrunedDescendants::new(root, order, move |e| ctx.eval(expr, e)))
        }
        (Ok(root), _) => Box::new(
            Descendants::new(root, order).filter_map(move |e| keep(ctx, filter, Ok(e))),
        ),
        (Err(err), _) => Box::new(std::iter::once(Err(err))),
    }
}

/// Callers of one element; elements that cannot have callers contribute
/// nothing unless the context is strict.
fn callers_of<'p>(ctx: &QueryContext<'p>, item: Result<EntityRef<'p>>) -> Vec<Result<EntityRef<'p>>> {
    let entity = match item {
        Ok(entity) => entity,
        Err(err) => return vec![Err(err)],
    };
    match ctx.callers_of(entity) {
        Ok(callers) => callers.into_iter().map(Ok).collect(),
        Err(err) if err.is_unsupported_attribute() && !ctx.config().strict_filters => Vec::new(),
        Err(err) => vec![Err(err)],
    }
}
