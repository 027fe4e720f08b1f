//! Domain entities: input map, layout parameters and output geometry

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Node name to ordered child names. Key order is the document order of the input.
pub type AdjacencyMap = IndexMap<String, Vec<String>>;

/// Geometry constants driving placement and canvas sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Radius of a drawn node; lines stop this far from node centers
    pub node_radius: f64,
    /// Distance between neighbouring leaves
    pub horizontal_spacing: f64,
    /// Distance between levels
    pub vertical_spacing: f64,
    /// Start offset of the cursor and margin around the content
    pub padding: f64,
    pub min_canvas_width: f64,
    pub min_canvas_height: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_radius: 30.0,
            horizontal_spacing: 180.0,
            vertical_spacing: 120.0,
            padding: 50.0,
            min_canvas_width: 800.0,
            min_canvas_height: 600.0,
        }
    }
}

/// A laid out node as handed to the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Connector between a parent and a child, endpoints already offset by the node radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ConnectorLine {
    pub fn translate(&mut self, offset: Translation) {
        self.x1 += offset.dx;
        self.y1 += offset.dy;
        self.x2 += offset.dx;
        self.y2 += offset.dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Shift applied to every coordinate so the content is centered on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

/// Final output bundle of one layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub lines: Vec<ConnectorLine>,
    pub canvas: CanvasSize,
    #[serde(skip)]
    pub offset: Translation,
}

impl LayoutResult {
    /// Result with nothing to draw and a canvas at its minimum size.
    pub fn empty(params: &LayoutParams) -> Self {
        Self {
            nodes: Vec::new(),
            lines: Vec::new(),
            canvas: CanvasSize {
                width: params.min_canvas_width,
                height: params.min_canvas_height,
            },
            offset: Translation::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, name: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Plain name/children record of the sharing-free copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralNode {
    pub name: String,
    pub children: Vec<StructuralNode>,
}

impl StructuralNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }
}

impl Drop for StructuralNode {
    // Flatten before dropping so deep hierarchies do not recurse
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Forest of [`StructuralNode`]s where every occurrence of a name is its own record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralCopy {
    pub roots: Vec<StructuralNode>,
}

impl StructuralCopy {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of records across all root subtrees.
    pub fn occurrence_count(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order walk yielding each record with its depth below the root.
    pub fn iter(&self) -> StructuralIter<'_> {
        StructuralIter {
            stack: self.roots.iter().rev().map(|n| (0, n)).collect(),
        }
    }
}

pub struct StructuralIter<'a> {
    stack: Vec<(usize, &'a StructuralNode)>,
}

impl<'a> Iterator for StructuralIter<'a> {
    type Item = (usize, &'a StructuralNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}
