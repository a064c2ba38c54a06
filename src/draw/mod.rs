//! Shape and paint definitions.
//!
//! This module defines the core drawing types used by the scene:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: entity geometry (rectangles, ellipses, paths, preview aids)
//! - [`Style`]: fill, stroke and stroke width

pub mod color;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use shape::{Shape, ShapeTag, Style};

pub use color::{BLACK, BLUE, GREEN, ORANGE, RED, TRANSPARENT, WHITE};
