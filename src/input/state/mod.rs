mod actions;
mod core;
mod mouse;
mod path;
mod readout;
mod sizing;

pub use core::{ActiveTool, Editor};
pub use path::{PathDraft, PathSettings, PathState, PathTool};
pub use readout::{DimensionReadout, Dimensions};
pub use sizing::{ShapeTool, SizingState};
