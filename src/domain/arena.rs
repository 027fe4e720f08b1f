use generational_arena::{Arena, Index};
use indexmap::IndexMap;
use tracing::instrument;

use crate::domain::entities::PositionedNode;

/// Node in the arena-based forest.
///
/// A name maps to exactly one node; parents that reference the same name
/// share it through its [`Index`].
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Indices of child nodes in the arena, in input order
    pub children: Vec<Index>,
    /// Construction depth, fixed on first visit
    pub level: usize,
    /// Depth of the most recent layout visit
    pub depth: usize,
    pub x: f64,
    pub y: f64,
}

impl TreeNode {
    fn new(name: String, level: usize) -> Self {
        Self {
            name,
            children: Vec::new(),
            level,
            depth: level,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed forest with a name-keyed occurrence table.
///
/// Creation order of the name table is the first-visit order of the build and
/// is the order in which nodes and edges are reported.
#[derive(Debug, Default)]
pub struct Forest {
    arena: Arena<TreeNode>,
    names: IndexMap<String, Index>,
    roots: Vec<Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a node. The caller guarantees `name` is not registered yet.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: &str, level: usize) -> Index {
        let idx = self.arena.insert(TreeNode::new(name.to_string(), level));
        self.names.insert(name.to_string(), idx);
        idx
    }

    pub fn attach_child(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn push_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    pub fn lookup(&self, name: &str) -> Option<Index> {
        self.names.get(name).copied()
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&TreeNode> {
        self.lookup(name).and_then(|idx| self.get_node(idx))
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn root_names(&self) -> Vec<String> {
        self.roots
            .iter()
            .filter_map(|&idx| self.get_node(idx))
            .map(|n| n.name.clone())
            .collect()
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Distinct nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (Index, &TreeNode)> + '_ {
        self.names
            .values()
            .filter_map(move |&idx| self.arena.get(idx).map(|node| (idx, node)))
    }

    /// Every (parent, child) link: parents in creation order, children in list order.
    pub fn edges(&self) -> impl Iterator<Item = (&TreeNode, &TreeNode)> + '_ {
        self.nodes().flat_map(move |(_, parent)| {
            parent
                .children
                .iter()
                .filter_map(move |&c| self.arena.get(c).map(|child| (parent, child)))
        })
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for (_, node) in self.arena.iter_mut() {
            node.x += dx;
            node.y += dy;
        }
    }

    pub fn positioned_nodes(&self) -> Vec<PositionedNode> {
        self.nodes()
            .map(|(_, n)| PositionedNode {
                name: n.name.clone(),
                x: n.x,
                y: n.y,
            })
            .collect()
    }

    /// Pre-order walk over occurrences: a shared node appears once per path reaching it.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> OccurrenceIterator<'_> {
        OccurrenceIterator::new(self)
    }
}

pub struct OccurrenceIterator<'a> {
    forest: &'a Forest,
    stack: Vec<(Index, usize)>,
}

impl<'a> OccurrenceIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().map(|&idx| (idx, 0)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for OccurrenceIterator<'a> {
    type Item = (Index, &'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current_idx, node, depth));
            }
        }
        None
    }
}
