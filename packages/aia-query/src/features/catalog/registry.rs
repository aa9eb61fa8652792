//! Catalogs: the authoritative set of component and block types for a project
//!
//! Types are handed out as `Arc`s; comparing a component's type against a
//! catalog constant is a pointer comparison, so a same-named type from a
//! different catalog never matches.

use super::block_type::BlockType;
use super::component_type::ComponentType;
use super::descriptor::ComponentDescriptor;
use super::standard_blocks::STANDARD_BLOCKS;
use crate::errors::{QueryError, Result};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct ComponentCatalog {
    types: IndexMap<String, Arc<ComponentType>>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every descriptor from a `simple_components.json` document (a JSON
    /// array of component descriptors).
    pub fn from_descriptor_json(json: &str) -> Result<Self> {
        let descriptors: Vec<ComponentDescriptor> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.register(descriptor.into_component_type())?;
        }
        debug!(types = catalog.len(), "loaded component catalog");
        Ok(catalog)
    }

    /// Add a type; names are unique within a catalog.
    pub fn register(&mut self, ty: ComponentType) -> Result<Arc<ComponentType>> {
        if self.types.contains_key(&ty.name) {
            return Err(QueryError::Catalog(format!(
                "component type '{}' registered twice",
                ty.name
            )));
        }
        let ty = Arc::new(ty);
        self.types.insert(ty.name.clone(), Arc::clone(&ty));
        Ok(ty)
    }

    pub fn get(&self, name: &str) -> Result<Arc<ComponentType>> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| QueryError::not_found("component type", name))
    }

    /// True when `ty` is the very instance this catalog handed out.
    pub fn owns(&self, ty: &Arc<ComponentType>) -> bool {
        self.types
            .get(&ty.name)
            .is_some_and(|known| Arc::ptr_eq(known, ty))
    }

    /// True when any type declares a property called `name`.
    pub fn declares_property(&self, name: &str) -> bool {
        self.types.values().any(|ty| ty.properties.contains_key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComponentType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct BlockCatalog {
    types: IndexMap<String, Arc<BlockType>>,
}

impl BlockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in block vocabulary.
    pub fn standard() -> Self {
        let types = STANDARD_BLOCKS
            .iter()
            .map(|&(name, category, kind, mutators)| {
                let ty = BlockType::new(name, category, kind).with_mutators(mutators.iter().copied());
                (name.to_string(), Arc::new(ty))
            })
            .collect();
        Self { types }
    }

    pub fn register(&mut self, ty: BlockType) -> Result<Arc<BlockType>> {
        if self.types.contains_key(&ty.name) {
            return Err(QueryError::Catalog(format!(
                "block type '{}' registered twice",
                ty.name
            )));
        }
        let ty = Arc::new(ty);
        self.types.insert(ty.name.clone(), Arc::clone(&ty));
        Ok(ty)
    }

    pub fn get(&self, name: &str) -> Result<Arc<BlockType>> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| QueryError::not_found("block type", name))
    }

    pub fn owns(&self, ty: &Arc<BlockType>) -> bool {
        self.types
            .get(&ty.name)
            .is_some_and(|known| Arc::ptr_eq(known, ty))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BlockType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
