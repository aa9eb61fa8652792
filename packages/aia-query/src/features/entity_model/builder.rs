//! Model builders: the hand-off surface for project loaders
//!
//! ```ignore
//! let mut screen = ScreenBuilder::new("Screen1", ComponentDef::new("Screen1", form));
//! screen
//!     .add_component("Screen1", ComponentDef::new("Arrangement1", arrangement))?
//!     .add_component("Arrangement1", ComponentDef::new("Button1", button))?;
//! screen.add_block(None, BlockDef::new("b1", event).mutation("instance_name", "Button1"))?;
//!
//! let project = ProjectBuilder::new("Demo", components, blocks)
//!     .screen(screen.build()?)?
//!     .build()?;
//! ```
//!
//! Consistency is checked as pieces are added: parents must exist before
//! their children (so the trees are acyclic by construction), names and ids
//! are unique per screen, so are component uuids, only containers take child components, mutator
//! tags must be legal for the block type, and the root form is the only
//! `Form` on the screen. `build` checks cross references
//! and catalog membership.

use super::block::Block;
use super::component::Component;
use super::project::Project;
use super::screen::Screen;
use crate::errors::{QueryError, Result};
use crate::features::catalog::{BlockCatalog, BlockType, ComponentCatalog, ComponentType};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

/// Designer type of a screen's root component; no other component may use it.
const ROOT_FORM_TYPE: &str = "Form";

// ============================================================================
// Definitions
// ============================================================================

/// Component to be placed in a screen
#[derive(Debug, Clone)]
pub struct ComponentDef {
    name: String,
    uuid: Option<String>,
    component_type: Arc<ComponentType>,
    properties: IndexMap<String, String>,
}

impl ComponentDef {
    pub fn new(name: impl Into<String>, component_type: Arc<ComponentType>) -> Self {
        Self {
            name: name.into(),
            uuid: None,
            component_type,
            properties: IndexMap::new(),
        }
    }

    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// Block to be placed in a screen
#[derive(Debug, Clone)]
pub struct BlockDef {
    id: String,
    block_type: Arc<BlockType>,
    mutators: Vec<String>,
    mutation: IndexMap<String, String>,
    fields: IndexMap<String, String>,
    disabled: bool,
    comment: Option<String>,
    position: Option<(f64, f64)>,
}

impl BlockDef {
    pub fn new(id: impl Into<String>, block_type: Arc<BlockType>) -> Self {
        Self {
            id: id.into(),
            block_type,
            mutators: Vec::new(),
            mutation: IndexMap::new(),
            fields: IndexMap::new(),
            disabled: false,
            comment: None,
            position: None,
        }
    }

    /// Append a mutator tag (`elseif`, `else`, `arg`, ...).
    pub fn mutator(mut self, tag: impl Into<String>) -> Self {
        self.mutators.push(tag.into());
        self
    }

    /// Set a `<mutation>` attribute (`instance_name`, `event_name`, ...).
    pub fn mutation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mutation.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Some((x, y));
        self
    }
}

// ============================================================================
// Screen
// ============================================================================

#[derive(Debug)]
pub struct ScreenBuilder {
    name: String,
    root: String,
    components: IndexMap<String, Component>,
    uuids: FxHashSet<String>,
    blocks: IndexMap<String, Block>,
    top_level: Vec<String>,
    ya_version: Option<u32>,
    blocks_version: Option<u32>,
}

impl ScreenBuilder {
    /// Start a screen whose component tree is rooted at `form`.
    pub fn new(name: impl Into<String>, form: ComponentDef) -> Self {
        let root = form.name.clone();
        let uuid = form.uuid.clone().unwrap_or_else(|| "0".to_string());
        let mut components = IndexMap::new();
        components.insert(root.clone(), Self::component(form, None, uuid.clone()));
        Self {
            name: name.into(),
            root,
            components,
            uuids: FxHashSet::from_iter([uuid]),
            blocks: IndexMap::new(),
            top_level: Vec::new(),
            ya_version: None,
            blocks_version: None,
        }
    }

    pub fn versions(mut self, ya_version: Option<u32>, blocks_version: Option<u32>) -> Self {
        self.ya_version = ya_version;
        self.blocks_version = blocks_version;
        self
    }

    fn component(def: ComponentDef, parent: Option<String>, uuid: String) -> Component {
        Component {
            uuid,
            name: def.name,
            component_type: def.component_type,
            properties: def.properties,
            parent,
            children: Vec::new(),
        }
    }

    /// Append `def` as the last child of the component named `parent`.
    pub fn add_component(&mut self, parent: &str, def: ComponentDef) -> Result<&mut Self> {
        if self.components.contains_key(&def.name) {
            return Err(QueryError::invalid_model(format!(
                "duplicate component '{}' on screen '{}'",
                def.name, self.name
            )));
        }
        if def.component_type.name == ROOT_FORM_TYPE {
            return Err(QueryError::invalid_model(format!(
                "screen '{}' already has root form '{}'; '{}' cannot be a second one",
                self.name, self.root, def.name
            )));
        }
        let uuid = self.uuid_for(&def)?;
        let name = def.name.clone();
        let parent_component = self.components.get_mut(parent).ok_or_else(|| {
            QueryError::invalid_model(format!(
                "component '{}' has unknown parent '{}'",
                name, parent
            ))
        })?;
        if !parent_component.is_container() {
            return Err(QueryError::invalid_model(format!(
                "component '{}' cannot hold children ({} is not a container)",
                parent,
                parent_component.component_type().name
            )));
        }
        parent_component.children.push(name.clone());
        self.uuids.insert(uuid.clone());
        self.components
            .insert(name, Self::component(def, Some(parent.to_string()), uuid));
        Ok(self)
    }

    /// The caller's uuid if it is still free; otherwise the first free
    /// ordinal at or after the component's position.
    fn uuid_for(&self, def: &ComponentDef) -> Result<String> {
        if let Some(uuid) = &def.uuid {
            if self.uuids.contains(uuid) {
                return Err(QueryError::invalid_model(format!(
                    "component '{}' reuses uuid '{}' on screen '{}'",
                    def.name, uuid, self.name
                )));
            }
            return Ok(uuid.clone());
        }
        let ordinal = self.components.len();
        Ok((ordinal..)
            .map(|n| n.to_string())
            .find(|candidate| !self.uuids.contains(candidate))
            .unwrap_or_else(|| ordinal.to_string()))
    }

    /// Append `def` under block `parent`, or as a top-level block.
    pub fn add_block(&mut self, parent: Option<&str>, def: BlockDef) -> Result<&mut Self> {
        if self.blocks.contains_key(&def.id) {
            return Err(QueryError::invalid_model(format!(
                "duplicate block id '{}' on screen '{}'",
                def.id, self.name
            )));
        }
        if let Some(tag) = def
            .mutators
            .iter()
            .find(|tag| !def.block_type.allows_mutator(tag))
        {
            return Err(QueryError::invalid_model(format!(
                "mutator '{}' is not legal for block type '{}'",
                tag, def.block_type.name
            )));
        }

        match parent {
            Some(parent_id) => {
                let parent_block = self.blocks.get_mut(parent_id).ok_or_else(|| {
                    QueryError::invalid_model(format!(
                        "block '{}' has unknown parent '{}'",
                        def.id, parent_id
                    ))
                })?;
                parent_block.children.push(def.id.clone());
            }
            None => self.top_level.push(def.id.clone()),
        }

        let block = Block {
            id: def.id.clone(),
            block_type: def.block_type,
            mutators: def.mutators,
            mutation: def.mutation,
            fields: def.fields,
            parent: parent.map(str::to_string),
            children: Vec::new(),
            component: None,
            declares: None,
            references: None,
            disabled: def.disabled,
            comment: def.comment,
            position: def.position,
        };
        self.blocks.insert(def.id, block);
        Ok(self)
    }

    /// Resolve block cross references and freeze the screen.
    pub fn build(mut self) -> Result<Screen> {
        let root_is_container = self
            .components
            .get(&self.root)
            .is_some_and(Component::is_container);
        if !root_is_container {
            return Err(QueryError::invalid_model(format!(
                "root component '{}' of screen '{}' is not a container",
                self.root, self.name
            )));
        }

        for block in self.blocks.values_mut() {
            if !block.is_generic() {
                if let Some(instance) = block.mutation("instance_name") {
                    if !self.components.contains_key(instance) {
                        return Err(QueryError::invalid_model(format!(
                            "block '{}' refers to unknown component '{}'",
                            block.id, instance
                        )));
                    }
                    block.component = Some(instance.to_string());
                }
            }
            let (declares, references) = block.derive_references();
            block.declares = declares;
            block.references = references;
        }

        Ok(Screen {
            name: self.name,
            components: self.components,
            root: self.root,
            blocks: self.blocks,
            top_level: self.top_level,
            ya_version: self.ya_version,
            blocks_version: self.blocks_version,
        })
    }
}

// ============================================================================
// Project
// ============================================================================

#[derive(Debug)]
pub struct ProjectBuilder {
    name: String,
    properties: IndexMap<String, String>,
    screens: IndexMap<String, Screen>,
    component_catalog: Arc<ComponentCatalog>,
    block_catalog: Arc<BlockCatalog>,
}

impl ProjectBuilder {
    pub fn new(
        name: impl Into<String>,
        component_catalog: Arc<ComponentCatalog>,
        block_catalog: Arc<BlockCatalog>,
    ) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            screens: IndexMap::new(),
            component_catalog,
            block_catalog,
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add a built screen; screen names are unique.
    pub fn screen(mut self, screen: Screen) -> Result<Self> {
        if self.screens.contains_key(&screen.name) {
            return Err(QueryError::invalid_model(format!(
                "duplicate screen '{}'",
                screen.name
            )));
        }
        self.screens.insert(screen.name.clone(), screen);
        Ok(self)
    }

    /// Check every type belongs to the project's catalogs and freeze.
    pub fn build(self) -> Result<Project> {
        for screen in self.screens.values() {
            if let Some(component) = screen
                .components()
                .find(|c| !self.component_catalog.owns(c.component_type()))
            {
                return Err(QueryError::invalid_model(format!(
                    "component '{}/{}' uses type '{}' from outside the project catalog",
                    screen.name,
                    component.name(),
                    component.component_type().name
                )));
            }
            if let Some(block) = screen
                .blocks()
                .find(|b| !self.block_catalog.owns(b.block_type()))
            {
                return Err(QueryError::invalid_model(format!(
                    "block '{}/{}' uses type '{}' from outside the project catalog",
                    screen.name,
                    block.id(),
                    block.block_type().name
                )));
            }
        }

        let project = Project {
            name: self.name,
            screens: self.screens,
            properties: self.properties,
            component_catalog: self.component_catalog,
            block_catalog: self.block_catalog,
        };
        debug!(
            project = %project.name,
            screens = project.screen_count(),
            components = project.component_count(),
            blocks = project.block_count(),
            "built project model"
        );
        Ok(project)
    }
}
