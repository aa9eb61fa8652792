use super::entity_ref::EntityRef;
use super::screen::Screen;
use crate::errors::{QueryError, Result};
use crate::features::catalog::{BlockCatalog, BlockType, ComponentCatalog, ComponentType};
use indexmap::IndexMap;
use std::sync::Arc;

/// Root of a loaded project
///
/// Screens keep archive order. Project-wide component and block views are
/// computed from the screens on demand.
#[derive(Debug, Clone)]
pub struct Project {
    pub(crate) name: String,
    pub(crate) screens: IndexMap<String, Screen>,
    pub(crate) properties: IndexMap<String, String>,
    pub(crate) component_catalog: Arc<ComponentCatalog>,
    pub(crate) block_catalog: Arc<BlockCatalog>,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn screen(&self, name: &str) -> Result<&Screen> {
        self.screens
            .get(name)
            .ok_or_else(|| QueryError::not_found("screen", name))
    }

    pub fn screens(&self) -> impl Iterator<Item = &Screen> {
        self.screens.values()
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// `project.properties` entries (app name, version code, ...).
    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn component_catalog(&self) -> &Arc<ComponentCatalog> {
        &self.component_catalog
    }

    pub fn block_catalog(&self) -> &Arc<BlockCatalog> {
        &self.block_catalog
    }

    pub fn component_type(&self, name: &str) -> Result<Arc<ComponentType>> {
        self.component_catalog.get(name)
    }

    pub fn block_type(&self, name: &str) -> Result<Arc<BlockType>> {
        self.block_catalog.get(name)
    }

    /// Look up a component by `Screen/Name`, or by bare name (first screen
    /// in archive order that has it).
    pub fn component(&self, key: &str) -> Result<EntityRef<'_>> {
        match key.split_once('/') {
            Some((screen, name)) => self.screen(screen)?.component_ref(name),
            None => self
                .screens()
                .find_map(|screen| screen.component_ref(key).ok())
                .ok_or_else(|| QueryError::not_found("component", key)),
        }
    }

    /// Look up a block by `Screen/id`, or by bare id.
    pub fn block(&self, key: &str) -> Result<EntityRef<'_>> {
        match key.split_once('/') {
            Some((screen, id)) => self.screen(screen)?.block_ref(id),
            None => self
                .screens()
                .find_map(|screen| screen.block_ref(key).ok())
                .ok_or_else(|| QueryError::not_found("block", key)),
        }
    }

    pub fn screen_refs(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.screens.values().map(EntityRef::Screen)
    }

    pub fn component_refs(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.screens.values().flat_map(|screen| screen.component_refs())
    }

    pub fn block_refs(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.screens.values().flat_map(|screen| screen.block_refs())
    }

    pub fn component_count(&self) -> usize {
        self.screens().map(Screen::component_count).sum()
    }

    pub fn block_count(&self) -> usize {
        self.screens().map(Screen::block_count).sum()
    }
}
