use super::block::Block;
use super::component::Component;
use super::entity_ref::EntityRef;
use crate::errors::{QueryError, Result};
use indexmap::IndexMap;

/// One screen: a component tree rooted at its form plus a flat block table
#[derive(Debug, Clone)]
pub struct Screen {
    pub(crate) name: String,
    pub(crate) components: IndexMap<String, Component>,
    pub(crate) root: String,
    pub(crate) blocks: IndexMap<String, Block>,
    pub(crate) top_level: Vec<String>,
    pub(crate) ya_version: Option<u32>,
    pub(crate) blocks_version: Option<u32>,
}

impl Screen {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ya_version(&self) -> Option<u32> {
        self.ya_version
    }

    pub fn blocks_version(&self) -> Option<u32> {
        self.blocks_version
    }

    /// The screen's form. Always present in a built screen.
    pub fn root_component(&self) -> Result<&Component> {
        self.component(&self.root)
    }

    pub fn component(&self, name: &str) -> Result<&Component> {
        self.components
            .get(name)
            .ok_or_else(|| QueryError::not_found("component", format!("{}/{}", self.name, name)))
    }

    pub fn block(&self, id: &str) -> Result<&Block> {
        self.blocks
            .get(id)
            .ok_or_else(|| QueryError::not_found("block", format!("{}/{}", self.name, id)))
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn top_level_blocks(&self) -> impl Iterator<Item = &Block> {
        self.top_level.iter().filter_map(|id| self.blocks.get(id))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn as_entity(&self) -> EntityRef<'_> {
        EntityRef::Screen(self)
    }

    pub fn component_refs(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.components
            .values()
            .map(move |component| EntityRef::Component {
                screen: self,
                component,
            })
    }

    pub fn block_refs(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.blocks
            .values()
            .map(move |block| EntityRef::Block {
                screen: self,
                block,
            })
    }

    pub fn top_level_refs(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.top_level_blocks()
            .map(move |block| EntityRef::Block {
                screen: self,
                block,
            })
    }

    pub fn component_ref(&self, name: &str) -> Result<EntityRef<'_>> {
        Ok(EntityRef::Component {
            screen: self,
            component: self.component(name)?,
        })
    }

    pub fn block_ref(&self, id: &str) -> Result<EntityRef<'_>> {
        Ok(EntityRef::Block {
            screen: self,
            block: self.block(id)?,
        })
    }
}
