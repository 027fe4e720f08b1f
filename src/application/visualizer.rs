//! The visualize pipeline: text in, laid out forest out.

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    parse_input, AdjacencyMap, BoundsNormalizer, EdgeProjector, Forest, LayoutEngine,
    LayoutParams, LayoutResult, StructuralCopy, TextFormat, TextRenderer, TreeBuilder,
};

/// Everything one run produces.
#[derive(Debug)]
pub struct Visualization {
    /// Root names in detection order
    pub roots: Vec<String>,
    pub layout: LayoutResult,
    /// Sharing-free copy taken before any coordinates were assigned
    pub structure: StructuralCopy,
    /// Node records after centering, with construction level and layout depth
    pub forest: Forest,
}

impl Visualization {
    pub fn empty(params: &LayoutParams) -> Self {
        Self {
            roots: Vec::new(),
            layout: LayoutResult::empty(params),
            structure: StructuralCopy::default(),
            forest: Forest::new(),
        }
    }

    pub fn text(&self, format: TextFormat) -> String {
        TextRenderer::new(format).render(&self.structure)
    }
}

/// Pure pipeline from an adjacency description to a [`Visualization`].
///
/// Holds only the geometry constants; every call rebuilds from scratch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Visualizer {
    params: LayoutParams,
}

impl Visualizer {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Parse, validate and lay out `input`.
    #[instrument(level = "debug", skip_all)]
    pub fn visualize(&self, input: &str) -> ApplicationResult<Visualization> {
        let adjacency = parse_input(input)?;
        self.visualize_map(&adjacency)
    }

    /// Lay out an already validated map.
    pub fn visualize_map(&self, adjacency: &AdjacencyMap) -> ApplicationResult<Visualization> {
        let (mut forest, structure) = TreeBuilder::new().build(adjacency)?;

        LayoutEngine::new(&self.params).layout(&mut forest);
        let mut lines = EdgeProjector::new(&self.params).project(&forest);
        let (canvas, offset) = BoundsNormalizer::new(&self.params).normalize(&mut forest, &mut lines);
        debug!("{} nodes, {} lines", forest.len(), lines.len());

        let layout = LayoutResult {
            nodes: forest.positioned_nodes(),
            lines,
            canvas,
            offset,
        };
        let roots = forest.root_names();
        info!(
            "laid out {} roots on {}x{} canvas",
            roots.len(),
            canvas.width,
            canvas.height
        );

        Ok(Visualization {
            roots,
            layout,
            structure,
            forest,
        })
    }
}
