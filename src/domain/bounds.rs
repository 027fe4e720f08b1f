//! Bounding box, canvas size and centering translation.

use std::iter;

use tracing::debug;

use crate::domain::arena::Forest;
use crate::domain::entities::{CanvasSize, ConnectorLine, LayoutParams, Translation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    fn inflate(self, by: f64) -> Self {
        Self {
            min_x: self.min_x - by,
            min_y: self.min_y - by,
            max_x: self.max_x + by,
            max_y: self.max_y + by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsNormalizer {
    node_radius: f64,
    padding: f64,
    min_canvas_width: f64,
    min_canvas_height: f64,
}

impl BoundsNormalizer {
    pub fn new(params: &LayoutParams) -> Self {
        Self {
            node_radius: params.node_radius,
            padding: params.padding,
            min_canvas_width: params.min_canvas_width,
            min_canvas_height: params.min_canvas_height,
        }
    }

    /// Content box over all node centers and the origin, grown by the node radius.
    pub fn content_bounds(&self, forest: &Forest) -> Bounds {
        let points = forest.nodes().map(|(_, n)| (n.x, n.y));
        Bounds::from_points(iter::once((0.0, 0.0)).chain(points))
            .unwrap_or(Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            })
            .inflate(self.node_radius)
    }

    pub fn canvas_size(&self, content: &Bounds) -> CanvasSize {
        CanvasSize {
            width: (content.width() + 2.0 * self.padding).max(self.min_canvas_width),
            height: (content.height() + 2.0 * self.padding).max(self.min_canvas_height),
        }
    }

    /// Translate nodes and lines in place so the content box is centered on the canvas.
    pub fn normalize(
        &self,
        forest: &mut Forest,
        lines: &mut [ConnectorLine],
    ) -> (CanvasSize, Translation) {
        let content = self.content_bounds(forest);
        let canvas = self.canvas_size(&content);
        let (cx, cy) = content.center();
        let offset = Translation {
            dx: canvas.width / 2.0 - cx,
            dy: canvas.height / 2.0 - cy,
        };
        debug!(
            "canvas {}x{}, offset ({}, {})",
            canvas.width, canvas.height, offset.dx, offset.dy
        );

        forest.translate(offset.dx, offset.dy);
        for line in lines.iter_mut() {
            line.translate(offset);
        }
        (canvas, offset)
    }
}
