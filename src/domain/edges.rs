use tracing::trace;

use crate::domain::arena::Forest;
use crate::domain::entities::{ConnectorLine, LayoutParams};

/// Derives connector lines from parent/child positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeProjector {
    node_radius: f64,
}

impl EdgeProjector {
    pub fn new(params: &LayoutParams) -> Self {
        Self {
            node_radius: params.node_radius,
        }
    }

    /// One line per parent/child link, from the bottom of the parent to the top of the child.
    pub fn project(&self, forest: &Forest) -> Vec<ConnectorLine> {
        let lines: Vec<ConnectorLine> = forest
            .edges()
            .map(|(parent, child)| ConnectorLine {
                x1: parent.x,
                y1: parent.y + self.node_radius,
                x2: child.x,
                y2: child.y - self.node_radius,
            })
            .collect();
        trace!("projected {} lines", lines.len());
        lines
    }
}
