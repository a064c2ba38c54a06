//! Shape definitions for scene entities.

use super::color::{Color, BLACK, TRANSPARENT};
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Geometry of a scene entity.
///
/// Each variant carries only what the drawing tools need to read or write:
/// point lists for paths, extents for rectangles and ellipses. Transforms are
/// the scene's business and are not modelled here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle
    Rect {
        /// Top-left X coordinate
        x: f64,
        /// Top-left Y coordinate
        y: f64,
        /// Width in scene units
        width: f64,
        /// Height in scene units
        height: f64,
    },
    /// Axis-aligned ellipse
    Ellipse {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Horizontal radius
        rx: f64,
        /// Vertical radius
        ry: f64,
    },
    /// Polyline (open) or polygon (closed) built by the path tool
    Path {
        /// Originating point sequence, kept for later editing
        points: Vec<Point>,
        /// Whether the last point connects back to the first
        closed: bool,
    },
    /// Straight segment (rubber-band preview)
    Line { from: Point, to: Point },
    /// Circle marker (path start indicator)
    Circle { center: Point, radius: f64 },
}

/// Coarse type tag used where only the kind of entity matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeTag {
    Rect,
    Ellipse,
    Path,
    Line,
    Circle,
}

impl Shape {
    pub fn tag(&self) -> ShapeTag {
        match self {
            Shape::Rect { .. } => ShapeTag::Rect,
            Shape::Ellipse { .. } => ShapeTag::Ellipse,
            Shape::Path { .. } => ShapeTag::Path,
            Shape::Line { .. } => ShapeTag::Line,
            Shape::Circle { .. } => ShapeTag::Circle,
        }
    }

    /// Returns true for the shapes the drag-to-create tool produces and edits.
    pub fn is_sizable(&self) -> bool {
        matches!(self, Shape::Rect { .. } | Shape::Ellipse { .. })
    }

    /// Returns the axis-aligned bounding box for this shape.
    ///
    /// Returns `None` only for a path without points.
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => Some(Rect::from_min_max(*x, *y, x + width, y + height)),
            Shape::Ellipse { cx, cy, rx, ry } => {
                Some(Rect::from_min_max(cx - rx, cy - ry, cx + rx, cy + ry))
            }
            Shape::Path { points, .. } => bounding_box_for_points(points),
            Shape::Line { from, to } => bounding_box_for_points(&[*from, *to]),
            Shape::Circle { center, radius } => Some(Rect::from_min_max(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            )),
        }
    }

    /// Hit-tests a point against the shape, growing it by `tolerance`.
    ///
    /// Ellipses use their implicit equation; every other shape falls back to
    /// its bounding box.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Ellipse { cx, cy, rx, ry } => {
                let rx = rx + tolerance;
                let ry = ry + tolerance;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (point.x - cx) / rx;
                let dy = (point.y - cy) / ry;
                dx * dx + dy * dy <= 1.0
            }
            _ => self
                .bounding_box()
                .is_some_and(|bounds| bounds.inflate(tolerance).contains(point)),
        }
    }

    /// Moves the shape by the given offset.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Rect { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Shape::Ellipse { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Path { points, .. } => {
                for point in points.iter_mut() {
                    point.x += dx;
                    point.y += dy;
                }
            }
            Shape::Line { from, to } => {
                from.x += dx;
                from.y += dy;
                to.x += dx;
                to.y += dy;
            }
            Shape::Circle { center, .. } => {
                center.x += dx;
                center.y += dy;
            }
        }
    }
}

fn bounding_box_for_points(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in &points[1..] {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }
    Some(Rect::from_min_max(min_x, min_y, max_x, max_y))
}

/// Paint applied to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Interior color; transparent means no fill
    pub fill: Color,
    /// Outline color
    pub stroke: Color,
    /// Outline width in scene units
    pub stroke_width: f64,
}

impl Default for Style {
    /// Opaque black hairline with no fill.
    fn default() -> Self {
        Self {
            fill: TRANSPARENT,
            stroke: BLACK,
            stroke_width: 0.3,
        }
    }
}
