//! Domain layer: the layout engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod bounds;
pub mod builder;
pub mod edges;
pub mod entities;
pub mod error;
pub mod layout;
pub mod text;
pub mod validator;

pub use arena::{Forest, TreeNode};
pub use bounds::{Bounds, BoundsNormalizer};
pub use builder::{structural_copy, TreeBuilder};
pub use edges::EdgeProjector;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use layout::LayoutEngine;
pub use text::{TextFormat, TextRenderer};
pub use validator::{parse_input, validate};
