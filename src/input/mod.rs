//! Input handling and tool state machines.
//!
//! This module translates host keyboard and pointer events into scene edits.
//! It owns the editor, the capturing tools (pen and drag-to-create), the
//! dimension readout, and the glue that feeds scene notifications to the
//! history journal.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod style;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{DimensionReadout, Dimensions, Editor, PathSettings};
pub use style::StyleSource;
pub use tool::{ShapeKind, Tool};
