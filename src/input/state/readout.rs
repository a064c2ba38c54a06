//! Numeric width/height (or radii) readout for the active shape.

use crate::draw::Shape;
use crate::scene::EntityId;
use crate::util;
use serde::{Deserialize, Serialize};

/// Extent of a rectangle or ellipse as shown in the readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dimensions {
    Rect { width: f64, height: f64 },
    Ellipse { rx: f64, ry: f64 },
}

impl Dimensions {
    /// Reads the extent of a rectangle or ellipse; `None` for other shapes.
    pub fn of(shape: &Shape) -> Option<Self> {
        match shape {
            Shape::Rect { width, height, .. } => Some(Dimensions::Rect {
                width: *width,
                height: *height,
            }),
            Shape::Ellipse { rx, ry, .. } => Some(Dimensions::Ellipse { rx: *rx, ry: *ry }),
            _ => None,
        }
    }

    /// Rounds both components to two decimals.
    pub fn rounded(self) -> Self {
        match self {
            Dimensions::Rect { width, height } => Dimensions::Rect {
                width: util::round2(width),
                height: util::round2(height),
            },
            Dimensions::Ellipse { rx, ry } => Dimensions::Ellipse {
                rx: util::round2(rx),
                ry: util::round2(ry),
            },
        }
    }

    /// True when both components are finite and not negative.
    pub fn is_valid(&self) -> bool {
        let (a, b) = self.components();
        a.is_finite() && b.is_finite() && a >= 0.0 && b >= 0.0
    }

    /// True when either component is zero.
    pub fn is_degenerate(&self) -> bool {
        let (a, b) = self.components();
        a == 0.0 || b == 0.0
    }

    fn components(&self) -> (f64, f64) {
        match *self {
            Dimensions::Rect { width, height } => (width, height),
            Dimensions::Ellipse { rx, ry } => (rx, ry),
        }
    }
}

/// Readout state shown next to the canvas.
///
/// Visible exactly while a rectangle or ellipse is the active selection (or
/// being sized), regardless of which tool is enabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionReadout {
    pub visible: bool,
    pub target: Option<EntityId>,
    pub dims: Option<Dimensions>,
}

impl DimensionReadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn show(&mut self, target: EntityId, dims: Dimensions) {
        self.visible = true;
        self.target = Some(target);
        self.dims = Some(dims.rounded());
    }

    pub(crate) fn hide(&mut self) {
        *self = Self::default();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_rounds_to_two_decimals() {
        let mut readout = DimensionReadout::new();
        readout.show(
            EntityId(3),
            Dimensions::Ellipse {
                rx: 12.3456,
                ry: 0.005,
            },
        );
        assert!(readout.is_visible());
        assert_eq!(readout.target(), Some(EntityId(3)));
        assert_eq!(
            readout.dimensions(),
            Some(Dimensions::Ellipse { rx: 12.35, ry: 0.01 })
        );

        readout.hide();
        assert_eq!(readout, DimensionReadout::default());
    }

    #[test]
    fn validity_rejects_negative_and_non_finite() {
        assert!(Dimensions::Rect {
            width: 0.0,
            height: 4.0
        }
        .is_valid());
        assert!(!Dimensions::Rect {
            width: -1.0,
            height: 4.0
        }
        .is_valid());
        assert!(!Dimensions::Ellipse {
            rx: f64::NAN,
            ry: 1.0
        }
        .is_valid());
        assert!(!Dimensions::Ellipse {
            rx: 1.0,
            ry: f64::INFINITY
        }
        .is_valid());
    }

    #[test]
    fn only_rects_and_ellipses_have_dimensions() {
        let path = Shape::Path {
            points: Vec::new(),
            closed: false,
        };
        assert_eq!(Dimensions::of(&path), None);
    }
}
