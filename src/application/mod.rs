//! Application layer: the visualize pipeline and the latest-result session
//!
//! This layer wires the domain components together; it does no terminal I/O.

pub mod error;
pub mod error_ext;
pub mod session;
pub mod visualizer;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use session::Session;
pub use visualizer::{Visualization, Visualizer};
