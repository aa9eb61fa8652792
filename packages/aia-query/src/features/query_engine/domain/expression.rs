// Expression AST - filter predicates over entity attributes
//
// Provides immutable, reusable expression trees for filtering:
// - Attribute references, literals, catalog type constants
// - Comparisons (eq, ne, lt, le, gt, ge)
// - String operations (contains, regex, starts-with, ends-with)
// - Boolean logic (and, or, not), short-circuiting left to right
// - Structural predicates (has-ancestor, has-descendant)
//
// Attributes are resolved at evaluation time through a `Resolve`
// implementation. An attribute the entity does not support makes the
// enclosing predicate false unless the resolver asks for strict filters.

use super::attribute::Attribute;
use super::value::{TypeRef, Value};
use crate::errors::{QueryError, Result};
use crate::features::catalog::{BlockType, ComponentType};
use crate::features::entity_model::{EntityKind, EntityRef};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Ne => ordering != Ordering::Equal,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// Expression AST for filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    // Operands
    Attr(Attribute),
    Literal(Value),

    // Comparison
    Compare(CmpOp, Box<Expr>, Box<Expr>),

    // String operations
    Contains(Box<Expr>, String),
    Regex(Box<Expr>, String),
    StartsWith(Box<Expr>, String),
    EndsWith(Box<Expr>, String),

    // Boolean logic
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),

    // Structure; `None` means "any"
    HasAncestor(Option<Box<Expr>>),
    HasDescendant(Option<Box<Expr>>),
}

impl Expr {
    /// Matches everything.
    pub fn always() -> Expr {
        Expr::Literal(Value::Bool(true))
    }

    pub fn compare(op: CmpOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
        Expr::Compare(op, Box::new(left.into()), Box::new(right.into()))
    }

    pub fn literal(value: impl Into<Value>) -> Expr {
        Expr::Literal(value.into())
    }

    /// `type == ty`
    pub fn of_type(ty: impl Into<Value>) -> Expr {
        Expr::compare(CmpOp::Eq, Expr::Attr(Attribute::Type), Expr::Literal(ty.into()))
    }

    pub fn has_ancestor(filter: Option<Expr>) -> Expr {
        Expr::HasAncestor(filter.map(Box::new))
    }

    pub fn has_descendant(filter: Option<Expr>) -> Expr {
        Expr::HasDescendant(filter.map(Box::new))
    }

    /// Conjunction, flattening nested `And`s.
    pub fn and(self, other: impl Into<Expr>) -> Expr {
        match (self, other.into()) {
            (Expr::And(mut left), Expr::And(right)) => {
                left.extend(right);
                Expr::And(left)
            }
            (Expr::And(mut left), right) => {
                left.push(right);
                Expr::And(left)
            }
            (left, Expr::And(mut right)) => {
                right.insert(0, left);
                Expr::And(right)
            }
            (left, right) => Expr::And(vec![left, right]),
        }
    }

    /// Disjunction, flattening nested `Or`s.
    pub fn or(self, other: impl Into<Expr>) -> Expr {
        match (self, other.into()) {
            (Expr::Or(mut left), Expr::Or(right)) => {
                left.extend(right);
                Expr::Or(left)
            }
            (Expr::Or(mut left), right) => {
                left.push(right);
                Expr::Or(left)
            }
            (left, Expr::Or(mut right)) => {
                right.insert(0, left);
                Expr::Or(right)
            }
            (left, right) => Expr::Or(vec![left, right]),
        }
    }

    /// Negation; a double negation cancels out.
    pub fn negate(self) -> Expr {
        match self {
            Expr::Not(inner) => *inner,
            other => Expr::Not(Box::new(other)),
        }
    }

    /// Every node of the tree, depth first.
    pub fn walk(&self, visit: &mut dyn FnMut(&Expr)) {
        visit(self);
        match self {
            Expr::Attr(_) | Expr::Literal(_) => {}
            Expr::Compare(_, l, r) => {
                l.walk(visit);
                r.walk(visit);
            }
            Expr::Contains(e, _) | Expr::Regex(e, _) | Expr::StartsWith(e, _) | Expr::EndsWith(e, _) => {
                e.walk(visit)
            }
            Expr::And(items) | Expr::Or(items) => items.iter().for_each(|e| e.walk(visit)),
            Expr::Not(e) => e.walk(visit),
            Expr::HasAncestor(f) | Expr::HasDescendant(f) => {
                if let Some(e) = f {
                    e.walk(visit)
                }
            }
        }
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Literal(v)
    }
}

/// A bare type constant filters by type.
impl From<TypeRef> for Expr {
    fn from(ty: TypeRef) -> Self {
        Expr::of_type(ty)
    }
}

impl From<Arc<ComponentType>> for Expr {
    fn from(ty: Arc<ComponentType>) -> Self {
        Expr::of_type(ty)
    }
}

impl From<&Arc<ComponentType>> for Expr {
    fn from(ty: &Arc<ComponentType>) -> Self {
        Expr::of_type(ty)
    }
}

impl From<Arc<BlockType>> for Expr {
    fn from(ty: Arc<BlockType>) -> Self {
        Expr::of_type(ty)
    }
}

impl From<&Arc<BlockType>> for Expr {
    fn from(ty: &Arc<BlockType>) -> Self {
        Expr::of_type(ty)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = |f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str| -> fmt::Result {
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(")")
        };
        match self {
            Expr::Attr(a) => write!(f, "{a}"),
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Compare(op, l, r) => write!(f, "{l} {} {r}", op.symbol()),
            Expr::Contains(e, s) => write!(f, "{e} contains {s:?}"),
            Expr::Regex(e, s) => write!(f, "{e} matches /{s}/"),
            Expr::StartsWith(e, s) => write!(f, "{e} starts with {s:?}"),
            Expr::EndsWith(e, s) => write!(f, "{e} ends with {s:?}"),
            Expr::And(items) => joined(f, items, " & "),
            Expr::Or(items) => joined(f, items, " | "),
            Expr::Not(e) => write!(f, "~{e}"),
            Expr::HasAncestor(None) => f.write_str("has_ancestor"),
            Expr::HasAncestor(Some(e)) => write!(f, "has_ancestor({e})"),
            Expr::HasDescendant(None) => f.write_str("has_descendant"),
            Expr::HasDescendant(Some(e)) => write!(f, "has_descendant({e})"),
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Attribute source for the evaluator (the query context in practice)
pub trait Resolve<'p> {
    fn resolve(&self, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value>;

    /// Surface UnsupportedAttribute from filters instead of "no match".
    fn strict_filters(&self) -> bool {
        false
    }
}

/// Expression evaluator - evaluates Expr against one entity
pub struct ExprEvaluator;

impl ExprEvaluator {
    /// Does `entity` satisfy `expr`?
    pub fn eval<'p, R>(expr: &Expr, entity: EntityRef<'p>, resolver: &R) -> Result<bool>
    where
        R: Resolve<'p> + ?Sized,
    {
        match expr {
            Expr::Literal(Value::Type(ty)) => Self::eval(&Expr::of_type(ty.clone()), entity, resolver),
            Expr::Attr(_) | Expr::Literal(_) => {
                Self::guarded(entity, resolver, |_| Ok(Self::operand(expr, entity, resolver)?.is_truthy()))
            }
            Expr::Compare(op, left, right) => Self::guarded(entity, resolver, |_| {
                let l = Self::operand(left, entity, resolver)?;
                let r = Self::operand(right, entity, resolver)?;
                match op {
                    CmpOp::Eq => Ok(l.loose_eq(&r)),
                    CmpOp::Ne => Ok(!l.loose_eq(&r)),
                    _ => Ok(op.accepts(l.try_cmp(&r)?)),
                }
            }),
            Expr::Contains(inner, needle) => Self::guarded(entity, resolver, |_| {
                match Self::operand(inner, entity, resolver)? {
                    Value::List(items) => Ok(items.iter().any(|item| item.loose_eq(&Value::from(needle.as_str())))),
                    other => Self::text_test(&other, "contains", |s| s.contains(needle.as_str())),
                }
            }),
            Expr::StartsWith(inner, prefix) => Self::guarded(entity, resolver, |_| {
                let value = Self::operand(inner, entity, resolver)?;
                Self::text_test(&value, "starts with", |s| s.starts_with(prefix.as_str()))
            }),
            Expr::EndsWith(inner, suffix) => Self::guarded(entity, resolver, |_| {
                let value = Self::operand(inner, entity, resolver)?;
                Self::text_test(&value, "ends with", |s| s.ends_with(suffix.as_str()))
            }),
            Expr::Regex(inner, pattern) => {
                let re = regex::Regex::new(pattern).map_err(|e| {
                    QueryError::invalid_expression(format!("bad regex /{pattern}/: {e}"))
                })?;
                Self::guarded(entity, resolver, |_| {
                    let value = Self::operand(inner, entity, resolver)?;
                    Self::text_test(&value, "matches", |s| re.is_match(s))
                })
            }
            Expr::And(items) => {
                for item in items {
                    if !Self::eval(item, entity, resolver)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Expr::Or(items) => {
                for item in items {
                    if Self::eval(item, entity, resolver)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Expr::Not(inner) => Ok(!Self::eval(inner, entity, resolver)?),
            Expr::HasAncestor(filter) => {
                for ancestor in entity.ancestors() {
                    if Self::matches_optional(filter.as_deref(), ancestor, resolver)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Expr::HasDescendant(filter) => {
                let mut pending = entity.children();
                while let Some(next) = pending.pop() {
                    if Self::matches_optional(filter.as_deref(), next, resolver)? {
                        return Ok(true);
                    }
                    pending.extend(next.children());
                }
                Ok(false)
            }
        }
    }

    fn matches_optional<'p, R>(filter: Option<&Expr>, entity: EntityRef<'p>, resolver: &R) -> Result<bool>
    where
        R: Resolve<'p> + ?Sized,
    {
        match filter {
            None => Ok(true),
            Some(expr) => Self::eval(expr, entity, resolver),
        }
    }

    /// Value of an operand position. Boolean sub-expressions yield `Bool`.
    fn operand<'p, R>(expr: &Expr, entity: EntityRef<'p>, resolver: &R) -> Result<Value>
    where
        R: Resolve<'p> + ?Sized,
    {
        match expr {
            Expr::Attr(attribute) => resolver.resolve(entity, attribute),
            Expr::Literal(value) => Ok(value.clone()),
            other => Self::eval(other, entity, resolver).map(Value::Bool),
        }
    }

    /// Runs a leaf predicate, turning UnsupportedAttribute into `false`
    /// unless the resolver is strict.
    fn guarded<'p, R, F>(entity: EntityRef<'p>, resolver: &R, predicate: F) -> Result<bool>
    where
        R: Resolve<'p> + ?Sized,
        F: FnOnce(EntityKind) -> Result<bool>,
    {
        match predicate(entity.kind()) {
            Err(err) if err.is_unsupported_attribute() && !resolver.strict_filters() => {
                trace!(entity = %entity, error = %err, "filter treats unsupported attribute as no match");
                Ok(false)
            }
            other => other,
        }
    }

    fn text_test(value: &Value, what: &str, test: impl Fn(&str) -> bool) -> Result<bool> {
        match value {
            Value::Null => Ok(false),
            other => match other.as_str() {
                Some(s) => Ok(test(s)),
                None => Err(QueryError::type_mismatch(format!(
                    "'{what}' needs text, got {}",
                    other.kind_name()
                ))),
            },
        }
    }
}
