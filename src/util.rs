//! Utility functions for colors and drag geometry.
//!
//! This module provides:
//! - Color name mapping for the configuration file
//! - 2D points and axis-aligned bounds
//! - Corner-to-corner rectangle and ellipse calculations used while dragging

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "orange", "white", "black", "transparent"/"none"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "orange" => Some(ORANGE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" | "none" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// A point on the drawing surface, in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounds used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rectangle from min/max bounds.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Grows the rectangle evenly in all directions by `amount`.
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Returns true if the point lies inside or on the edge.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Calculates a normalized rectangle from two drag corners.
///
/// # Returns
/// Tuple `(x, y, width, height)` where `(x, y)` is the top-left corner. The
/// result does not depend on which corner the drag started from.
pub fn rect_bounds(anchor: Point, current: Point) -> (f64, f64, f64, f64) {
    let x = anchor.x.min(current.x);
    let y = anchor.y.min(current.y);
    let width = (current.x - anchor.x).abs();
    let height = (current.y - anchor.y).abs();
    (x, y, width, height)
}

/// Calculates ellipse parameters from two corner points.
///
/// Converts a drag rectangle (from corner to corner) into ellipse parameters
/// (center point and radii).
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` where:
/// - `cx`, `cy` = center point coordinates
/// - `rx` = horizontal radius (half width)
/// - `ry` = vertical radius (half height)
pub fn ellipse_bounds(anchor: Point, current: Point) -> (f64, f64, f64, f64) {
    let cx = (anchor.x + current.x) / 2.0;
    let cy = (anchor.y + current.y) / 2.0;
    let rx = (current.x - anchor.x).abs() / 2.0;
    let ry = (current.y - anchor.y).abs() / 2.0;
    (cx, cy, rx, ry)
}

/// Rounds a value to two decimal places for the numeric readout.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
