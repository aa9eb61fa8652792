//! Attribute names
//!
//! `Attribute` is what an expression refers to; `AttributeSlot` drops the
//! parameter of the parameterised attributes (`property.<P>`, `field.<F>`,
//! `mutation.<M>`) and keys the resolver dispatch table.

use crate::errors::{QueryError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Attribute {
    Type,
    Name,
    Id,
    Depth,
    Length,
    Children,
    Mutators,
    Callers,
    Level,
    Leaf,
    TopLevel,
    Kind,
    Category,
    Disabled,
    LogicallyDisabled,
    Generic,
    External,
    Visible,
    Version,
    HelpString,
    ShowOnPalette,
    IconName,
    ReturnType,
    RootBlock,
    Property(String),
    Field(String),
    Mutation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeSlot {
    Type,
    Name,
    Id,
    Depth,
    Length,
    Children,
    Mutators,
    Callers,
    Level,
    Leaf,
    TopLevel,
    Kind,
    Category,
    Disabled,
    LogicallyDisabled,
    Generic,
    External,
    Visible,
    Version,
    HelpString,
    ShowOnPalette,
    IconName,
    ReturnType,
    RootBlock,
    Property,
    Field,
    Mutation,
}

/// Mutation keys with a dedicated handle and bare-name spelling.
pub const NAMED_MUTATIONS: &[&str] = &[
    "event_name",
    "method_name",
    "property_name",
    "component_type",
    "instance_name",
];

const SIMPLE: &[(&str, Attribute)] = &[
    ("type", Attribute::Type),
    ("name", Attribute::Name),
    ("id", Attribute::Id),
    ("depth", Attribute::Depth),
    ("length", Attribute::Length),
    ("children", Attribute::Children),
    ("mutators", Attribute::Mutators),
    ("callers", Attribute::Callers),
    ("level", Attribute::Level),
    ("leaf", Attribute::Leaf),
    ("top_level", Attribute::TopLevel),
    ("kind", Attribute::Kind),
    ("category", Attribute::Category),
    ("disabled", Attribute::Disabled),
    ("logically_disabled", Attribute::LogicallyDisabled),
    ("generic", Attribute::Generic),
    ("external", Attribute::External),
    ("visible", Attribute::Visible),
    ("version", Attribute::Version),
    ("help_string", Attribute::HelpString),
    ("show_on_palette", Attribute::ShowOnPalette),
    ("icon_name", Attribute::IconName),
    ("return_type", Attribute::ReturnType),
    ("root_block", Attribute::RootBlock),
];

impl Attribute {
    pub fn slot(&self) -> AttributeSlot {
        match self {
            Attribute::Type => AttributeSlot::Type,
            Attribute::Name => AttributeSlot::Name,
            Attribute::Id => AttributeSlot::Id,
            Attribute::Depth => AttributeSlot::Depth,
            Attribute::Length => AttributeSlot::Length,
            Attribute::Children => AttributeSlot::Children,
            Attribute::Mutators => AttributeSlot::Mutators,
            Attribute::Callers => AttributeSlot::Callers,
            Attribute::Level => AttributeSlot::Level,
            Attribute::Leaf => AttributeSlot::Leaf,
            Attribute::TopLevel => AttributeSlot::TopLevel,
            Attribute::Kind => AttributeSlot::Kind,
            Attribute::Category => AttributeSlot::Category,
            Attribute::Disabled => AttributeSlot::Disabled,
            Attribute::LogicallyDisabled => AttributeSlot::LogicallyDisabled,
            Attribute::Generic => AttributeSlot::Generic,
            Attribute::External => AttributeSlot::External,
            Attribute::Visible => AttributeSlot::Visible,
            Attribute::Version => AttributeSlot::Version,
            Attribute::HelpString => AttributeSlot::HelpString,
            Attribute::ShowOnPalette => AttributeSlot::ShowOnPalette,
            Attribute::IconName => AttributeSlot::IconName,
            Attribute::ReturnType => AttributeSlot::ReturnType,
            Attribute::RootBlock => AttributeSlot::RootBlock,
            Attribute::Property(_) => AttributeSlot::Property,
            Attribute::Field(_) => AttributeSlot::Field,
            Attribute::Mutation(_) => AttributeSlot::Mutation,
        }
    }

    /// Parse `depth`, `property.Text`, `field.NAME`, `mutation.x`, or a
    /// named mutation key such as `event_name`.
    pub fn parse(name: &str) -> Result<Self> {
        if let Some((_, attr)) = SIMPLE.iter().find(|(n, _)| *n == name) {
            return Ok(attr.clone());
        }
        if NAMED_MUTATIONS.contains(&name) {
            return Ok(Attribute::Mutation(name.to_string()));
        }
        let parameterised = |prefix: &str| {
            name.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(str::to_string)
        };
        if let Some(p) = parameterised("property.") {
            return Ok(Attribute::Property(p));
        }
        if let Some(f) = parameterised("field.") {
            return Ok(Attribute::Field(f));
        }
        if let Some(m) = parameterised("mutation.") {
            return Ok(Attribute::Mutation(m));
        }
        Err(QueryError::invalid_expression(format!(
            "unknown attribute '{name}'"
        )))
    }
}

impl FromStr for Attribute {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Property(p) => write!(f, "property.{p}"),
            Attribute::Field(n) => write!(f, "field.{n}"),
            Attribute::Mutation(m) if NAMED_MUTATIONS.contains(&m.as_str()) => f.write_str(m),
            Attribute::Mutation(m) => write!(f, "mutation.{m}"),
            simple => {
                let name = SIMPLE
                    .iter()
                    .find(|(_, attr)| attr == simple)
                    .map(|(n, _)| *n)
                    .unwrap_or("?");
                f.write_str(name)
            }
        }
    }
}

impl From<Attribute> for String {
    fn from(attr: Attribute) -> Self {
        attr.to_string()
    }
}
