//! Tree builder turning an adjacency map into a forest with shared node identities.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::Forest;
use crate::domain::entities::{AdjacencyMap, StructuralCopy, StructuralNode};
use crate::domain::error::{DomainError, DomainResult};

/// Result type for tree operations.
pub type TreeResult<T> = DomainResult<T>;

/// Constructs a [`Forest`] and its sharing-free [`StructuralCopy`].
pub struct TreeBuilder {
    child_names: HashSet<String>,
    on_path: HashSet<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct BuildFrame {
    idx: Index,
    level: usize,
    next_child: usize,
}

struct CopyFrame {
    idx: Index,
    next_child: usize,
    children: Vec<StructuralNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            child_names: HashSet::new(),
            on_path: HashSet::new(),
        }
    }

    /// Build the forest for `adjacency`.
    ///
    /// Fails with [`DomainError::CycleDetected`] when a name is reached again
    /// while it is still on the construction path.
    #[instrument(level = "debug", skip_all, fields(entries = adjacency.len()))]
    pub fn build(&mut self, adjacency: &AdjacencyMap) -> TreeResult<(Forest, StructuralCopy)> {
        // Reset state for a fresh build
        self.child_names.clear();
        self.on_path.clear();

        self.collect_child_names(adjacency);
        let root_names = self.find_root_nodes(adjacency);
        debug!("roots: {:?}", root_names);

        let mut forest = Forest::new();
        for root in &root_names {
            self.build_tree(adjacency, &mut forest, root)?;
        }
        debug!("built {} nodes", forest.len());

        let copy = structural_copy(&forest);
        Ok((forest, copy))
    }

    fn collect_child_names(&mut self, adjacency: &AdjacencyMap) {
        for children in adjacency.values() {
            self.child_names.extend(children.iter().cloned());
        }
    }

    /// Keys never used as a child, in key order; the first key when there are none.
    fn find_root_nodes(&self, adjacency: &AdjacencyMap) -> Vec<String> {
        let mut roots: Vec<String> = adjacency
            .keys()
            .filter(|name| !self.child_names.contains(*name))
            .cloned()
            .collect();

        if roots.is_empty() {
            if let Some(first) = adjacency.keys().next() {
                debug!("no unreferenced key, falling back to first key: {}", first);
                roots.push(first.clone());
            }
        }
        roots
    }

    fn build_tree(
        &mut self,
        adjacency: &AdjacencyMap,
        forest: &mut Forest,
        root: &str,
    ) -> TreeResult<()> {
        let root_idx = forest.insert_node(root, 0);
        forest.push_root(root_idx);
        self.on_path.insert(root.to_string());
        let mut stack = vec![BuildFrame {
            idx: root_idx,
            level: 0,
            next_child: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let name = match forest.get_node(frame.idx) {
                Some(node) => node.name.clone(),
                None => {
                    stack.pop();
                    continue;
                }
            };
            let child = adjacency
                .get(&name)
                .and_then(|children| children.get(frame.next_child))
                .cloned();

            let Some(child) = child else {
                trace!("finished {}", name);
                self.on_path.remove(&name);
                stack.pop();
                continue;
            };
            frame.next_child += 1;
            let parent_idx = frame.idx;
            let level = frame.level + 1;

            if self.on_path.contains(&child) {
                return Err(DomainError::CycleDetected(child));
            }

            match forest.lookup(&child) {
                Some(shared) => {
                    trace!("sharing {} under {}", child, name);
                    forest.attach_child(parent_idx, shared);
                }
                None => {
                    let child_idx = forest.insert_node(&child, level);
                    forest.attach_child(parent_idx, child_idx);
                    self.on_path.insert(child);
                    stack.push(BuildFrame {
                        idx: child_idx,
                        level,
                        next_child: 0,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Expand every root subtree into independent records, one per occurrence path.
pub fn structural_copy(forest: &Forest) -> StructuralCopy {
    let mut roots = Vec::with_capacity(forest.roots().len());

    for &root in forest.roots() {
        let mut stack = vec![CopyFrame {
            idx: root,
            next_child: 0,
            children: Vec::new(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = forest.get_node(frame.idx) else {
                stack.pop();
                continue;
            };

            if let Some(&child) = node.children.get(frame.next_child) {
                frame.next_child += 1;
                stack.push(CopyFrame {
                    idx: child,
                    next_child: 0,
                    children: Vec::new(),
                });
                continue;
            }

            let record = StructuralNode {
                name: node.name.clone(),
                children: std::mem::take(&mut frame.children),
            };
            stack.pop();
            match stack.last_mut() {
                Some(parent) => parent.children.push(record),
                None => roots.push(record),
            }
        }
    }

    StructuralCopy { roots }
}
