//! Query context
//!
//! Binds a [`Project`] to a [`QueryConfig`] and is the entry point for every
//! query: it hands out root selections, resolves attributes and evaluates
//! filters. The callers reverse index and the depth table are built the
//! first time they are needed and then shared by every query issued through
//! this context.

use super::domain::{Attribute, Expr, ExprEvaluator, Resolve, TypeRef, Value};
use super::infrastructure::{AttributeResolver, CallerIndex, DepthIndex, ResolverEnv};
use super::selection::{Selection, Source};
use crate::config::QueryConfig;
use crate::errors::{QueryError, Result};
use crate::features::entity_model::{EntityRef, Project};
use once_cell::sync::OnceCell;

pub struct QueryContext<'p> {
    project: &'p Project,
    config: QueryConfig,
    callers: OnceCell<CallerIndex<'p>>,
    depths: OnceCell<DepthIndex<'p>>,
}

impl<'p> QueryContext<'p> {
    pub fn new(project: &'p Project) -> Self {
        Self::with_config(project, QueryConfig::default())
    }

    pub fn with_config(project: &'p Project, config: QueryConfig) -> Self {
        Self {
            project,
            config,
            callers: OnceCell::new(),
            depths: OnceCell::new(),
        }
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    // ========================================================================
    // Root selections
    // ========================================================================

    pub fn screens(&self) -> Selection<'_, 'p> {
        Selection::new(self, Source::Screens)
    }

    /// Every component of every screen, screen by screen.
    pub fn components(&self) -> Selection<'_, 'p> {
        Selection::new(self, Source::Components(None))
    }

    /// Every block of every screen, screen by screen.
    pub fn blocks(&self) -> Selection<'_, 'p> {
        Selection::new(self, Source::Blocks(None))
    }

    pub fn screen_components(&self, screen: &str) -> Result<Selection<'_, 'p>> {
        let screen = self.project.screen(screen)?;
        Ok(Selection::new(self, Source::Components(Some(screen))))
    }

    pub fn screen_blocks(&self, screen: &str) -> Result<Selection<'_, 'p>> {
        let screen = self.project.screen(screen)?;
        Ok(Selection::new(self, Source::Blocks(Some(screen))))
    }

    pub fn top_level_blocks(&self, screen: &str) -> Result<Selection<'_, 'p>> {
        let screen = self.project.screen(screen)?;
        Ok(Selection::new(self, Source::TopLevel(screen)))
    }

    /// Selection over an explicit list of entities, in the given order.
    pub fn select_entities<I>(&self, entities: I) -> Selection<'_, 'p>
    where
        I: IntoIterator<Item = EntityRef<'p>>,
    {
        Selection::new(self, Source::Fixed(entities.into_iter().collect()))
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Resolve one attribute; unsupported attributes are an error here.
    pub fn resolve(&self, entity: EntityRef<'p>, attribute: impl Into<Attribute>) -> Result<Value> {
        AttributeResolver::resolve(self, entity, &attribute.into())
    }

    /// `None` for an attribute the entity does not have, unless strict.
    pub(crate) fn resolve_lenient(
        &self,
        entity: EntityRef<'p>,
        attribute: &Attribute,
    ) -> Result<Option<Value>> {
        match AttributeResolver::resolve(self, entity, attribute) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_unsupported_attribute() && !self.config.strict_filters => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn eval(&self, expr: &Expr, entity: EntityRef<'p>) -> Result<bool> {
        ExprEvaluator::eval(expr, entity, self)
    }

    pub fn caller_index(&self) -> &CallerIndex<'p> {
        self.callers.get_or_init(|| CallerIndex::build(self.project))
    }

    pub fn callers_of(&self, entity: EntityRef<'p>) -> Result<Vec<EntityRef<'p>>> {
        self.caller_index().callers_of(entity, self.config.callers_scope)
    }

    /// Check an expression against this project before running it.
    ///
    /// Type constants must come from the project's catalogs, property
    /// attributes must name a property some component type declares, and
    /// regex patterns must compile.
    pub fn validate_expr(&self, expr: &Expr) -> Result<()> {
        let mut first_error: Option<QueryError> = None;
        expr.walk(&mut |node| {
            if first_error.is_none() {
                first_error = self.check_node(node).err();
            }
        });
        first_error.map_or(Ok(()), Err)
    }

    fn check_node(&self, node: &Expr) -> Result<()> {
        match node {
            Expr::Literal(Value::Type(TypeRef::Component(ty))) => {
                if self.project.component_catalog().owns(ty) {
                    Ok(())
                } else {
                    Err(QueryError::not_found("component type", ty.name.clone()))
                }
            }
            Expr::Literal(Value::Type(TypeRef::Block(ty))) => {
                if self.project.block_catalog().owns(ty) {
                    Ok(())
                } else {
                    Err(QueryError::not_found("block type", ty.name.clone()))
                }
            }
            Expr::Attr(Attribute::Property(name)) => {
                if self.project.component_catalog().declares_property(name) {
                    Ok(())
                } else {
                    Err(QueryError::not_found("property", name.clone()))
                }
            }
            Expr::Regex(_, pattern) => regex::Regex::new(pattern).map(|_| ()).map_err(|e| {
                QueryError::invalid_expression(format!("bad regex /{pattern}/: {e}"))
            }),
            _ => Ok(()),
        }
    }
}

impl<'p> Resolve<'p> for QueryContext<'p> {
    fn resolve(&self, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
        AttributeResolver::resolve(self, entity, attribute)
    }

    fn strict_filters(&self) -> bool {
        self.config.strict_filters
    }
}

impl<'p> ResolverEnv<'p> for QueryContext<'p> {
    fn project(&self) -> &'p Project {
        self.project
    }

    fn callers(&self, entity: EntityRef<'p>) -> Result<Vec<EntityRef<'p>>> {
        self.callers_of(entity)
    }

    fn depth(&self, entity: EntityRef<'p>) -> usize {
        self.depths.get_or_init(|| DepthIndex::build(self.project)).depth(entity)
    }
}
