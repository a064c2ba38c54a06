use crate::input::{
    events::MouseButton,
    tool::{Capture, PointerEvent},
};
use crate::util::Point;
use log::debug;

use super::core::{ActiveTool, Editor, MoveDrag};

impl Editor {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Left press: offered to the active tool; when no tool captures it, the
    ///   entity under the pointer becomes the selection and can be dragged
    /// - Right press: cancels the current gesture
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        match button {
            MouseButton::Left => {
                let point = Point::new(x, y);
                if self.dispatch(PointerEvent::Press(point)) == Capture::PassThrough {
                    self.select_at(point);
                }
            }
            MouseButton::Right => {
                self.cancel_gesture();
            }
            MouseButton::Middle => {}
        }
        self.pump_events();
    }

    /// Processes pointer motion.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        let point = Point::new(x, y);
        if self.dispatch(PointerEvent::Move(point)) == Capture::PassThrough {
            self.drag_to(point);
        }
        self.pump_events();
    }

    /// Processes a mouse button release event.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }
        let point = Point::new(x, y);
        if self.dispatch(PointerEvent::Release(point)) == Capture::PassThrough {
            self.drag_to(point);
            self.drag = None;
        }
        self.pump_events();
    }

    /// Processes a double press. Hosts deliver it after the two presses and
    /// releases that make it up.
    pub fn on_double_press(&mut self, x: f64, y: f64) {
        self.dispatch(PointerEvent::DoublePress(Point::new(x, y)));
        self.pump_events();
    }

    /// Offers a pointer event to the capturing tool, if any.
    fn dispatch(&mut self, event: PointerEvent) -> Capture {
        let (tool, mut ctx) = self.tool_and_context();
        let capture = match tool {
            ActiveTool::Select => Capture::PassThrough,
            ActiveTool::Path(path) => path.handle(event, &mut ctx),
            ActiveTool::Shape(shape) => shape.handle(event, &mut ctx),
        };
        if capture == Capture::Captured {
            self.needs_redraw = true;
        }
        capture
    }

    fn select_at(&mut self, point: Point) {
        match self.scene.hit_test(point) {
            Some(entity) if self.scene.set_active_entity(Some(entity)) => {
                debug!("Pressed on {}", entity);
                self.drag = Some(MoveDrag {
                    entity,
                    last: point,
                });
            }
            _ => {
                self.scene.set_active_entity(None);
                self.drag = None;
            }
        }
    }

    fn drag_to(&mut self, point: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let dx = point.x - drag.last.x;
        let dy = point.y - drag.last.y;
        drag.last = point;
        let entity = drag.entity;
        if dx != 0.0 || dy != 0.0 {
            self.scene.translate_entity(entity, dx, dy);
        }
    }
}
