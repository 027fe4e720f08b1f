//! Subtree-centered coordinate assignment.
//!
//! One depth-first pass per root, left to right. Leaves take the next free
//! cursor position; a parent sits halfway between its leftmost and rightmost
//! child. Roots are separated by one extra horizontal step.

use generational_arena::Index;
use itertools::{Itertools, MinMaxResult};
use tracing::{debug, instrument};

use crate::domain::arena::Forest;
use crate::domain::entities::LayoutParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    horizontal_spacing: f64,
    vertical_spacing: f64,
    padding: f64,
}

struct Frame {
    idx: Index,
    depth: usize,
    next_child: usize,
    /// x of each finished child visit, in visit order
    child_xs: Vec<f64>,
}

impl LayoutEngine {
    pub fn new(params: &LayoutParams) -> Self {
        Self {
            horizontal_spacing: params.horizontal_spacing,
            vertical_spacing: params.vertical_spacing,
            padding: params.padding,
        }
    }

    /// Assign `x`, `y` and `depth` to every node reachable from the roots.
    ///
    /// Returns the cursor position after the last root.
    #[instrument(level = "debug", skip_all, fields(roots = forest.roots().len()))]
    pub fn layout(&self, forest: &mut Forest) -> f64 {
        let roots = forest.roots().to_vec();
        let mut cursor = self.padding;
        for root in roots {
            cursor = self.place_subtree(forest, root, cursor);
            cursor += self.horizontal_spacing;
        }
        debug!("layout cursor ended at {}", cursor);
        cursor
    }

    /// Place one subtree starting at `start_x`, returning the next free cursor value.
    ///
    /// A shared node is placed again on every visit; the last visit wins.
    fn place_subtree(&self, forest: &mut Forest, root: Index, start_x: f64) -> f64 {
        let mut cursor = start_x;
        self.enter(forest, root, 0);
        let mut stack = vec![Frame {
            idx: root,
            depth: 0,
            next_child: 0,
            child_xs: Vec::new(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = forest.get_node(frame.idx) else {
                stack.pop();
                continue;
            };

            let is_leaf = node.is_leaf();
            let next = node.children.get(frame.next_child).copied();

            let x = if is_leaf {
                let x = cursor;
                cursor += self.horizontal_spacing;
                x
            } else if let Some(child) = next {
                frame.next_child += 1;
                let depth = frame.depth + 1;
                self.enter(forest, child, depth);
                stack.push(Frame {
                    idx: child,
                    depth,
                    next_child: 0,
                    child_xs: Vec::new(),
                });
                continue;
            } else {
                centered(&frame.child_xs)
            };

            let idx = frame.idx;
            stack.pop();
            if let Some(node) = forest.get_node_mut(idx) {
                node.x = x;
            }
            if let Some(parent) = stack.last_mut() {
                parent.child_xs.push(x);
            }
        }

        cursor
    }

    fn enter(&self, forest: &mut Forest, idx: Index, depth: usize) {
        if let Some(node) = forest.get_node_mut(idx) {
            node.depth = depth;
            node.y = depth as f64 * self.vertical_spacing + self.padding;
        }
    }
}

/// Midpoint of the extreme values, not the mean of all of them.
fn centered(xs: &[f64]) -> f64 {
    match xs.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(x) => x,
        MinMaxResult::MinMax(min, max) => (min + max) / 2.0,
    }
}
