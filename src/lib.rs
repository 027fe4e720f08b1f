//! Hierarchy layout engine.
//!
//! Turns an adjacency description (`{"parent": ["child", ...]}`) into
//! positioned nodes, connector lines, a canvas size and a nested text view.
//!
//! ```
//! use treelayout::application::Visualizer;
//! use treelayout::domain::TextFormat;
//!
//! let vis = Visualizer::default()
//!     .visualize(r#"{"A": ["B", "C"], "C": ["D"]}"#)
//!     .unwrap();
//! assert_eq!(vis.roots, vec!["A".to_string()]);
//! assert_eq!(vis.layout.lines.len(), 3);
//! assert_eq!(vis.text(TextFormat::Bullets), "- A\n  - B\n  - C\n    - D\n");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
