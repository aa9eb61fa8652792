use serde::Serialize;
use std::fmt;

/// The three entity kinds a query can range over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Screen,
    Component,
    Block,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Screen, EntityKind::Component, EntityKind::Block];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::Component => "component",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned, project-unique handle for an entity
///
/// Screens use their own name as `id`; components use their designer name,
/// blocks their block id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub screen: String,
    pub id: String,
}

impl EntityKey {
    pub fn new(kind: EntityKind, screen: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind,
            screen: screen.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntityKind::Screen => write!(f, "{}", self.screen),
            _ => write!(f, "{}/{}", self.screen, self.id),
        }
    }
}
