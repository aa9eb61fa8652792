//! Block types: name, palette category, shape and legal mutator tags

use serde::Serialize;
use std::fmt;

/// Blocks editor drawer a block comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockCategory {
    Control,
    Logic,
    Math,
    Text,
    Lists,
    Dictionaries,
    Colors,
    Variables,
    Procedures,
    Components,
}

impl BlockCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Logic => "Logic",
            Self::Math => "Math",
            Self::Text => "Text",
            Self::Lists => "Lists",
            Self::Dictionaries => "Dictionaries",
            Self::Colors => "Colors",
            Self::Variables => "Variables",
            Self::Procedures => "Procedures",
            Self::Components => "Components",
        }
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block shape
///
/// `Mutation` marks types whose shape depends on the instance
/// (`component_set_get` getters vs setters, `component_method` with or
/// without a return value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Declaration,
    Statement,
    Value,
    Mutation,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Statement => "statement",
            Self::Value => "value",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockType {
    pub name: String,
    pub category: BlockCategory,
    pub kind: BlockKind,
    /// Mutator tags an instance may carry, e.g. `elseif`/`else` on `controls_if`
    pub mutators: Vec<String>,
}

impl BlockType {
    pub fn new(name: impl Into<String>, category: BlockCategory, kind: BlockKind) -> Self {
        Self {
            name: name.into(),
            category,
            kind,
            mutators: Vec::new(),
        }
    }

    pub fn with_mutators<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mutators = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn allows_mutator(&self, tag: &str) -> bool {
        self.mutators.iter().any(|m| m == tag)
    }

    pub fn is_procedure_definition(&self) -> bool {
        self.name.starts_with("procedures_def")
    }

    pub fn is_procedure_call(&self) -> bool {
        self.name.starts_with("procedures_call")
    }
}
