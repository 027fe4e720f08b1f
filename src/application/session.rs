//! Latest-result holder for an interactive surface.

use tracing::{debug, warn};

use crate::application::{ApplicationResult, Visualization, Visualizer};
use crate::domain::{LayoutResult, TextFormat};

/// Input text, last error and last successful result.
///
/// The result is only ever replaced as a whole: a successful run swaps in a
/// new [`Visualization`], a failed one resets it to the empty state.
#[derive(Debug)]
pub struct Session {
    visualizer: Visualizer,
    input: String,
    error: Option<String>,
    current: Visualization,
}

impl Session {
    pub fn new(visualizer: Visualizer) -> Self {
        let current = Visualization::empty(visualizer.params());
        Self {
            visualizer,
            input: String::new(),
            error: None,
            current,
        }
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Run the pipeline on the current input and publish the outcome.
    pub fn handle_visualize(&mut self) -> ApplicationResult<()> {
        match self.visualizer.visualize(&self.input) {
            Ok(vis) => {
                debug!("publishing {} nodes", vis.layout.nodes.len());
                self.error = None;
                self.current = vis;
                Ok(())
            }
            Err(e) => {
                warn!("visualize failed: {}", e);
                self.error = Some(e.user_message());
                self.reset_result();
                Err(e)
            }
        }
    }

    /// Forget input, error and result.
    pub fn handle_clear(&mut self) {
        self.input.clear();
        self.error = None;
        self.reset_result();
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> &LayoutResult {
        &self.current.layout
    }

    pub fn visualization(&self) -> &Visualization {
        &self.current
    }

    pub fn text_view(&self, format: TextFormat) -> String {
        self.current.text(format)
    }

    fn reset_result(&mut self) {
        self.current = Visualization::empty(self.visualizer.params());
    }
}
