// Infrastructure: subtree traversal over EntityRef
//
// Pre-order is the default for `descendants`; breadth-first is available for
// callers who want shallow entities first. The root itself is never yielded.
// Depth is computed bottom-up without recursion, so block chains of any
// length are fine.

use crate::errors::Result;
use crate::features::entity_model::{EntityRef, Project};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    #[default]
    PreOrder,
    BreadthFirst,
}

/// Lazy iterator over the strict descendants of one entity
pub struct Descendants<'p> {
    order: TraversalOrder,
    // Pre-order pops from the front after pushing children to the front;
    // breadth-first pushes children to the back.
    pending: VecDeque<EntityRef<'p>>,
}

impl<'p> Descendants<'p> {
    pub fn new(root: EntityRef<'p>, order: TraversalOrder) -> Self {
        Self {
            order,
            pending: root.children().into(),
        }
    }
}

impl<'p> Iterator for Descendants<'p> {
    type Item = EntityRef<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.pending.pop_front()?;
        let children = next.children();
        match self.order {
            TraversalOrder::PreOrder => {
                for child in children.into_iter().rev() {
                    self.pending.push_front(child);
                }
            }
            TraversalOrder::BreadthFirst => self.pending.extend(children),
        }
        Some(next)
    }
}

/// Descendants walk that yields only entities passing `accept` and does not
/// enter the subtree of an entity that fails it
pub struct PrunedDescendants<'p, F> {
    order: TraversalOrder,
    pending: VecDeque<EntityRef<'p>>,
    accept: F,
}

impl<'p, F> PrunedDescendants<'p, F>
where
    F: FnMut(EntityRef<'p>) -> Result<bool>,
{
    pub fn new(root: EntityRef<'p>, order: TraversalOrder, accept: F) -> Self {
        Self {
            order,
            pending: root.children().into(),
            accept,
        }
    }
}

impl<'p, F> Iterator for PrunedDescendants<'p, F>
where
    F: FnMut(EntityRef<'p>) -> Result<bool>,
{
    type Item = Result<EntityRef<'p>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.pending.pop_front()?;
            match (self.accept)(next) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => return Some(Err(err)),
            }
            let children = next.children();
            match self.order {
                TraversalOrder::PreOrder => {
                    for child in children.into_iter().rev() {
                        self.pending.push_front(child);
                    }
                }
                TraversalOrder::BreadthFirst => self.pending.extend(children),
            }
            return Some(Ok(next));
        }
    }
}

/// Longest root-to-leaf path, counting entities: 1 for a leaf.
pub fn depth(entity: EntityRef<'_>) -> usize {
    post_order(entity, |_, _| {})
}

/// Post-order walk on an explicit stack, handing every entity of the subtree
/// its depth. Returns the depth of `root`.
fn post_order<'p>(root: EntityRef<'p>, mut visit: impl FnMut(EntityRef<'p>, usize)) -> usize {
    struct Frame<'p> {
        entity: EntityRef<'p>,
        children: std::vec::IntoIter<EntityRef<'p>>,
        deepest: usize,
    }
    let frame = |entity: EntityRef<'p>| Frame {
        entity,
        children: entity.children().into_iter(),
        deepest: 0,
    };

    let mut stack = vec![frame(root)];
    let mut finished = 1;
    while let Some(top) = stack.last_mut() {
        if let Some(child) = top.children.next() {
            stack.push(frame(child));
            continue;
        }
        finished = top.deepest + 1;
        visit(top.entity, finished);
        stack.pop();
        if let Some(parent) = stack.last_mut() {
            parent.deepest = parent.deepest.max(finished);
        }
    }
    finished
}

/// Depth of every screen, component and block, computed in one pass
pub struct DepthIndex<'p> {
    depths: FxHashMap<EntityRef<'p>, usize>,
}

impl<'p> DepthIndex<'p> {
    pub fn build(project: &'p Project) -> Self {
        let mut depths = FxHashMap::default();
        let roots = project
            .screen_refs()
            .chain(project.block_refs().filter(|block| block.parent().is_none()));
        for root in roots {
            post_order(root, |entity, depth| {
                depths.insert(entity, depth);
            });
        }
        debug!(entities = depths.len(), "depth index built");
        Self { depths }
    }

    pub fn depth(&self, entity: EntityRef<'p>) -> usize {
        self.depths.get(&entity).copied().unwrap_or_else(|| depth(entity))
    }
}
