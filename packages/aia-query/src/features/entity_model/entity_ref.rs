//! Borrowed handle to any entity of a project
//!
//! Selections and the attribute resolver work exclusively on `EntityRef`, so
//! component trees and block trees share one navigation surface
//! (`parent` / `children`). A screen's only child is its root form; a root
//! form and a top-level block have no parent.

use super::block::Block;
use super::component::Component;
use super::kind::{EntityKey, EntityKind};
use super::screen::Screen;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy)]
pub enum EntityRef<'p> {
    Screen(&'p Screen),
    Component {
        screen: &'p Screen,
        component: &'p Component,
    },
    Block {
        screen: &'p Screen,
        block: &'p Block,
    },
}

impl<'p> EntityRef<'p> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Screen(_) => EntityKind::Screen,
            EntityRef::Component { .. } => EntityKind::Component,
            EntityRef::Block { .. } => EntityKind::Block,
        }
    }

    pub fn screen(&self) -> &'p Screen {
        match *self {
            EntityRef::Screen(screen) => screen,
            EntityRef::Component { screen, .. } | EntityRef::Block { screen, .. } => screen,
        }
    }

    /// Screen name, component designer name or block id.
    pub fn id(&self) -> &'p str {
        match *self {
            EntityRef::Screen(screen) => screen.name(),
            EntityRef::Component { component, .. } => component.name(),
            EntityRef::Block { block, .. } => block.id(),
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind(), self.screen().name(), self.id())
    }

    pub fn as_component(&self) -> Option<&'p Component> {
        match *self {
            EntityRef::Component { component, .. } => Some(component),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&'p Block> {
        match *self {
            EntityRef::Block { block, .. } => Some(block),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<EntityRef<'p>> {
        match *self {
            EntityRef::Screen(_) => None,
            EntityRef::Component { screen, component } => component
                .parent_name()
                .and_then(|name| screen.components.get(name))
                .map(|component| EntityRef::Component { screen, component }),
            EntityRef::Block { screen, block } => block
                .parent_id()
                .and_then(|id| screen.blocks.get(id))
                .map(|block| EntityRef::Block { screen, block }),
        }
    }

    /// Ordered direct children.
    pub fn children(&self) -> Vec<EntityRef<'p>> {
        match *self {
            EntityRef::Screen(screen) => screen
                .components
                .get(&screen.root)
                .map(|component| EntityRef::Component { screen, component })
                .into_iter()
                .collect(),
            EntityRef::Component { screen, component } => component
                .child_names()
                .iter()
                .filter_map(|name| screen.components.get(name))
                .map(|component| EntityRef::Component { screen, component })
                .collect(),
            EntityRef::Block { screen, block } => block
                .child_ids()
                .iter()
                .filter_map(|id| screen.blocks.get(id))
                .map(|block| EntityRef::Block { screen, block })
                .collect(),
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            EntityRef::Screen(_) => 1,
            EntityRef::Component { component, .. } => component.child_names().len(),
            EntityRef::Block { block, .. } => block.child_ids().len(),
        }
    }

    /// Parent, grandparent, ... up to the tree root.
    pub fn ancestors(&self) -> impl Iterator<Item = EntityRef<'p>> {
        std::iter::successors(self.parent(), EntityRef::parent)
    }

    fn address(&self) -> usize {
        match self {
            EntityRef::Screen(screen) => *screen as *const Screen as usize,
            EntityRef::Component { component, .. } => *component as *const Component as usize,
            EntityRef::Block { block, .. } => *block as *const Block as usize,
        }
    }
}

/// Identity: two refs are equal when they point at the same entity.
impl PartialEq for EntityRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.address() == other.address()
    }
}

impl Eq for EntityRef<'_> {}

impl Hash for EntityRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.address().hash(state);
    }
}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.key())
    }
}

impl fmt::Display for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
