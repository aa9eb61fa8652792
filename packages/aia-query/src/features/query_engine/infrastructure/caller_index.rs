// Infrastructure: CallerIndex - reverse reference lookups
//
// Built in one scan over every block of the project:
// - Reference -> blocks that refer to it (procedure calls, global
//   variable getters/setters, component method calls, property getters/setters)
// - (screen, component) -> blocks operating on that component
//
// Nothing is stored on the entities; the index borrows the project.

use crate::config::CallerScope;
use crate::errors::{QueryError, Result};
use crate::features::entity_model::{EntityKind, EntityRef, Project, Reference};
use crate::features::query_engine::domain::Attribute;
use rustc_hash::FxHashMap;
use tracing::debug;

pub struct CallerIndex<'p> {
    /// Referenced name -> referring blocks, project order
    by_reference: FxHashMap<&'p Reference, Vec<EntityRef<'p>>>,

    /// (screen, component name) -> blocks bound to that component
    by_component: FxHashMap<(&'p str, &'p str), Vec<EntityRef<'p>>>,
}

impl<'p> CallerIndex<'p> {
    pub fn build(project: &'p Project) -> Self {
        let mut by_reference: FxHashMap<&'p Reference, Vec<EntityRef<'p>>> = FxHashMap::default();
        let mut by_component: FxHashMap<(&'p str, &'p str), Vec<EntityRef<'p>>> =
            FxHashMap::default();

        for entity in project.block_refs() {
            let Some(block) = entity.as_block() else {
                continue;
            };
            if let Some(reference) = block.references() {
                by_reference.entry(reference).or_default().push(entity);
            }
            if let Some(component) = block.component_name() {
                by_component
                    .entry((entity.screen().name(), component))
                    .or_default()
                    .push(entity);
            }
        }

        debug!(
            references = by_reference.len(),
            components = by_component.len(),
            "callers index built"
        );

        Self {
            by_reference,
            by_component,
        }
    }

    /// Blocks referring to `entity`, excluding `entity` itself.
    ///
    /// Blocks must declare something (a procedure, a global, a component
    /// method or property); components are matched on their own screen.
    pub fn callers_of(&self, entity: EntityRef<'p>, scope: CallerScope) -> Result<Vec<EntityRef<'p>>> {
        match entity {
            EntityRef::Block { screen, block } => {
                let declared = block
                    .declares()
                    .ok_or_else(|| QueryError::unsupported(Attribute::Callers, EntityKind::Block))?;
                let callers = self
                    .by_reference
                    .get(declared)
                    .map(|blocks| {
                        blocks
                            .iter()
                            .copied()
                            .filter(|caller| *caller != entity)
                            .filter(|caller| match scope {
                                CallerScope::Screen => std::ptr::eq(caller.screen(), screen),
                                CallerScope::Project => true,
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(callers)
            }
            EntityRef::Component { screen, component } => Ok(self
                .by_component
                .get(&(screen.name(), component.name()))
                .cloned()
                .unwrap_or_default()),
            EntityRef::Screen(_) => Err(QueryError::unsupported(Attribute::Callers, EntityKind::Screen)),
        }
    }

    pub fn reference_count(&self) -> usize {
        self.by_reference.len()
    }
}
