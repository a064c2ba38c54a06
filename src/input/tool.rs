//! Tool selection and the contract shared by capturing tools.

use crate::draw::Style;
use crate::scene::Scene;
use crate::util::Point;

/// Which shape the drag-to-create tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

/// Tool currently owning pointer input.
///
/// At most one capturing tool is active at a time; `Select` means presses
/// fall through to ordinary selection and movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// No capturing tool: click to select, drag to move
    Select,
    /// Pen tool building a polyline or polygon point by point
    Path,
    /// Drag-to-create for rectangles or ellipses
    Shape(ShapeKind),
}

/// Pointer input delivered to a capturing tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    DoublePress(Point),
}

/// Whether a tool consumed a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// The tool handled the event; nothing else sees it
    Captured,
    /// The tool declined; ordinary selection and movement apply
    PassThrough,
}

/// What a tool may touch while handling one event.
pub struct ToolContext<'a> {
    pub scene: &'a mut Scene,
    /// Paint resolved from the style source at the time of the event
    pub style: Style,
}
