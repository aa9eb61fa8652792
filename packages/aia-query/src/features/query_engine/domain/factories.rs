// Domain: A factory and attribute handles - fluent filter entry points
// Enables syntax: A::depth().gt(2) & A::event_name().eq("Click")

use super::attribute::Attribute;
use super::expression::{CmpOp, Expr};
use super::value::Value;
use crate::errors::{QueryError, Result};

/// An attribute reference waiting to be compared
///
/// Used bare (through `Into<Expr>`) it tests truthiness.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrHandle {
    attribute: Attribute,
}

impl AttrHandle {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }

    /// Handle for an attribute given by name (`"depth"`, `"property.Text"`).
    pub fn parse(name: &str) -> Result<Self> {
        Attribute::parse(name).map(Self::new)
    }

    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    fn compare(&self, op: CmpOp, value: impl Into<Value>) -> Expr {
        Expr::compare(op, self.expr(), Expr::Literal(value.into()))
    }

    pub fn eq(&self, value: impl Into<Value>) -> Expr {
        self.compare(CmpOp::Eq, value)
    }

    pub fn ne(&self, value: impl Into<Value>) -> Expr {
        self.compare(CmpOp::Ne, value)
    }

    pub fn lt(&self, value: impl Into<Value>) -> Expr {
        self.compare(CmpOp::Lt, value)
    }

    pub fn le(&self, value: impl Into<Value>) -> Expr {
        self.compare(CmpOp::Le, value)
    }

    pub fn gt(&self, value: impl Into<Value>) -> Expr {
        self.compare(CmpOp::Gt, value)
    }

    pub fn ge(&self, value: impl Into<Value>) -> Expr {
        self.compare(CmpOp::Ge, value)
    }

    /// Substring test on text, membership test on lists.
    pub fn contains(&self, needle: impl Into<String>) -> Expr {
        Expr::Contains(Box::new(self.expr()), needle.into())
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Expr {
        Expr::StartsWith(Box::new(self.expr()), prefix.into())
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Expr {
        Expr::EndsWith(Box::new(self.expr()), suffix.into())
    }

    /// Regex match; the pattern is checked here so a typo fails early.
    pub fn matches(&self, pattern: impl Into<String>) -> Result<Expr> {
        let pattern = pattern.into();
        regex::Regex::new(&pattern).map_err(|e| {
            QueryError::invalid_expression(format!("bad regex /{pattern}/: {e}"))
        })?;
        Ok(Expr::Regex(Box::new(self.expr()), pattern))
    }

    pub fn truthy(&self) -> Expr {
        self.expr()
    }

    fn expr(&self) -> Expr {
        Expr::Attr(self.attribute.clone())
    }
}

impl From<AttrHandle> for Expr {
    fn from(handle: AttrHandle) -> Self {
        Expr::Attr(handle.attribute)
    }
}

impl From<AttrHandle> for Attribute {
    fn from(handle: AttrHandle) -> Self {
        handle.attribute
    }
}

impl From<&AttrHandle> for Attribute {
    fn from(handle: &AttrHandle) -> Self {
        handle.attribute.clone()
    }
}

/// A factory - attribute handle builder
pub struct A;

impl A {
    /// `A::type_()`; compare with a catalog type or its name
    pub fn type_() -> AttrHandle {
        AttrHandle::new(Attribute::Type)
    }

    pub fn name() -> AttrHandle {
        AttrHandle::new(Attribute::Name)
    }

    pub fn id() -> AttrHandle {
        AttrHandle::new(Attribute::Id)
    }

    pub fn depth() -> AttrHandle {
        AttrHandle::new(Attribute::Depth)
    }

    pub fn length() -> AttrHandle {
        AttrHandle::new(Attribute::Length)
    }

    pub fn children() -> AttrHandle {
        AttrHandle::new(Attribute::Children)
    }

    pub fn mutators() -> AttrHandle {
        AttrHandle::new(Attribute::Mutators)
    }

    pub fn callers() -> AttrHandle {
        AttrHandle::new(Attribute::Callers)
    }

    pub fn level() -> AttrHandle {
        AttrHandle::new(Attribute::Level)
    }

    pub fn leaf() -> AttrHandle {
        AttrHandle::new(Attribute::Leaf)
    }

    pub fn top_level() -> AttrHandle {
        AttrHandle::new(Attribute::TopLevel)
    }

    pub fn kind() -> AttrHandle {
        AttrHandle::new(Attribute::Kind)
    }

    pub fn category() -> AttrHandle {
        AttrHandle::new(Attribute::Category)
    }

    pub fn disabled() -> AttrHandle {
        AttrHandle::new(Attribute::Disabled)
    }

    pub fn logically_disabled() -> AttrHandle {
        AttrHandle::new(Attribute::LogicallyDisabled)
    }

    pub fn generic() -> AttrHandle {
        AttrHandle::new(Attribute::Generic)
    }

    pub fn external() -> AttrHandle {
        AttrHandle::new(Attribute::External)
    }

    pub fn visible() -> AttrHandle {
        AttrHandle::new(Attribute::Visible)
    }

    pub fn version() -> AttrHandle {
        AttrHandle::new(Attribute::Version)
    }

    pub fn help_string() -> AttrHandle {
        AttrHandle::new(Attribute::HelpString)
    }

    pub fn show_on_palette() -> AttrHandle {
        AttrHandle::new(Attribute::ShowOnPalette)
    }

    pub fn icon_name() -> AttrHandle {
        AttrHandle::new(Attribute::IconName)
    }

    /// Declared return type of a `component_method` block; Null for void methods
    pub fn return_type() -> AttrHandle {
        AttrHandle::new(Attribute::ReturnType)
    }

    /// Key of the top-level block of the stack a block belongs to
    pub fn root_block() -> AttrHandle {
        AttrHandle::new(Attribute::RootBlock)
    }

    /// Component property: `A::property("Text")`
    pub fn property(name: impl Into<String>) -> AttrHandle {
        AttrHandle::new(Attribute::Property(name.into()))
    }

    /// Block field: `A::field("PROCNAME")`
    pub fn field(name: impl Into<String>) -> AttrHandle {
        AttrHandle::new(Attribute::Field(name.into()))
    }

    /// Block mutation attribute: `A::mutation("set_or_get")`
    pub fn mutation(key: impl Into<String>) -> AttrHandle {
        AttrHandle::new(Attribute::Mutation(key.into()))
    }

    pub fn event_name() -> AttrHandle {
        Self::mutation("event_name")
    }

    pub fn method_name() -> AttrHandle {
        Self::mutation("method_name")
    }

    pub fn property_name() -> AttrHandle {
        Self::mutation("property_name")
    }

    pub fn component_type() -> AttrHandle {
        Self::mutation("component_type")
    }

    pub fn instance_name() -> AttrHandle {
        Self::mutation("instance_name")
    }
}
