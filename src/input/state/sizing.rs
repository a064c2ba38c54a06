//! Drag-to-create tool for rectangles and ellipses.

use super::readout::Dimensions;
use crate::draw::Shape;
use crate::input::tool::{Capture, PointerEvent, ShapeKind, ToolContext};
use crate::scene::{EntityId, InteractionFlags, Scene};
use crate::util::{self, Point};
use log::debug;

/// Sizing gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingState {
    /// Waiting for a press on empty canvas
    Idle,
    /// Button held; the provisional entity follows the pointer
    Sizing {
        /// Where the press happened; the opposite corner follows the pointer
        anchor: Point,
        /// Provisional entity being sized
        entity: EntityId,
    },
}

/// Creates rectangles or ellipses by dragging out their bounds.
#[derive(Debug)]
pub struct ShapeTool {
    kind: ShapeKind,
    hit_tolerance: f64,
    state: SizingState,
}

impl ShapeTool {
    pub fn new(kind: ShapeKind, hit_tolerance: f64) -> Self {
        Self {
            kind,
            hit_tolerance,
            state: SizingState::Idle,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn state(&self) -> SizingState {
        self.state
    }

    /// Provisional entity being sized, if a gesture is in progress.
    pub fn sizing_entity(&self) -> Option<EntityId> {
        match self.state {
            SizingState::Sizing { entity, .. } => Some(entity),
            SizingState::Idle => None,
        }
    }

    /// Single transition function for pointer input.
    pub fn handle(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> Capture {
        match (self.state, event) {
            (SizingState::Idle, PointerEvent::Press(point)) => {
                let over_sizable = ctx
                    .scene
                    .hit_test(point)
                    .and_then(|id| ctx.scene.get(id))
                    .is_some_and(|entity| entity.shape.is_sizable());
                if over_sizable {
                    return Capture::PassThrough;
                }

                let entity = ctx.scene.add_provisional(self.seed_shape(point), ctx.style);
                self.state = SizingState::Sizing {
                    anchor: point,
                    entity,
                };
                debug!("Sizing {:?} {} from ({}, {})", self.kind, entity, point.x, point.y);
                Capture::Captured
            }
            (SizingState::Sizing { anchor, entity }, PointerEvent::Move(point)) => {
                ctx.scene.update_provisional(entity, |e| drag_extent(&mut e.shape, anchor, point));
                Capture::Captured
            }
            (SizingState::Sizing { anchor, entity }, PointerEvent::Release(point)) => {
                ctx.scene.update_provisional(entity, |e| drag_extent(&mut e.shape, anchor, point));
                self.state = SizingState::Idle;
                self.commit(ctx.scene, entity);
                Capture::Captured
            }
            (SizingState::Sizing { .. }, _) => Capture::Captured,
            (SizingState::Idle, _) => Capture::PassThrough,
        }
    }

    fn seed_shape(&self, point: Point) -> Shape {
        match self.kind {
            ShapeKind::Rectangle => Shape::Rect {
                x: point.x,
                y: point.y,
                width: 0.0,
                height: 0.0,
            },
            ShapeKind::Ellipse => Shape::Ellipse {
                cx: point.x,
                cy: point.y,
                rx: 0.0,
                ry: 0.0,
            },
        }
    }

    fn commit(&self, scene: &mut Scene, entity: EntityId) {
        let degenerate = scene
            .get(entity)
            .and_then(|e| Dimensions::of(&e.shape))
            .is_none_or(|dims| dims.is_degenerate());
        if degenerate {
            debug!("Discarding zero-extent {:?}", self.kind);
            scene.remove_entity(entity);
            return;
        }

        scene.promote(entity, InteractionFlags::interactive(self.hit_tolerance));
        scene.set_active_entity(Some(entity));
        debug!("Created {:?} {}", self.kind, entity);
    }

    /// Abandons an in-progress gesture, removing its provisional entity.
    pub fn cancel(&mut self, scene: &mut Scene) {
        if let SizingState::Sizing { entity, .. } = self.state {
            scene.remove_entity(entity);
            debug!("Sizing cancelled");
        }
        self.state = SizingState::Idle;
    }
}

/// Writes `dims` into a rectangle or ellipse anchored at `origin`.
///
/// `origin` is the top-left corner of a rectangle or the center of an
/// ellipse. Both dragging and direct numeric edits go through here. Returns
/// false when the shape and dimensions disagree on the kind.
pub(crate) fn apply_extent(shape: &mut Shape, origin: Point, dims: Dimensions) -> bool {
    match (shape, dims) {
        (
            Shape::Rect {
                x,
                y,
                width,
                height,
            },
            Dimensions::Rect {
                width: new_width,
                height: new_height,
            },
        ) => {
            *x = origin.x;
            *y = origin.y;
            *width = new_width;
            *height = new_height;
            true
        }
        (
            Shape::Ellipse { cx, cy, rx, ry },
            Dimensions::Ellipse {
                rx: new_rx,
                ry: new_ry,
            },
        ) => {
            *cx = origin.x;
            *cy = origin.y;
            *rx = new_rx;
            *ry = new_ry;
            true
        }
        _ => false,
    }
}

/// Reshapes from the drag anchor to the pointer.
fn drag_extent(shape: &mut Shape, anchor: Point, current: Point) {
    let (origin, dims) = match &*shape {
        Shape::Rect { .. } => {
            let (x, y, width, height) = util::rect_bounds(anchor, current);
            (Point::new(x, y), Dimensions::Rect { width, height })
        }
        Shape::Ellipse { .. } => {
            let (cx, cy, rx, ry) = util::ellipse_bounds(anchor, current);
            (Point::new(cx, cy), Dimensions::Ellipse { rx, ry })
        }
        _ => return,
    };
    apply_extent(shape, origin, dims);
}

/// Origin that a numeric edit keeps fixed: top-left or center.
pub(crate) fn extent_origin(shape: &Shape) -> Option<Point> {
    match shape {
        Shape::Rect { x, y, .. } => Some(Point::new(*x, *y)),
        Shape::Ellipse { cx, cy, .. } => Some(Point::new(*cx, *cy)),
        _ => None,
    }
}
