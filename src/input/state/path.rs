//! Pen tool: builds a polyline or polygon one press at a time.
//!
//! While the tool is enabled every pre-existing entity has its selectability
//! and event routing suspended so presses land on the canvas. The original
//! flags are kept in a side table keyed by entity id and written back
//! verbatim when the tool is disabled.

use crate::config::Config;
use crate::draw::{Color, Shape, Style, TRANSPARENT};
use crate::input::tool::{Capture, PointerEvent, ToolContext};
use crate::scene::{EntityId, InteractionFlags, Scene};
use crate::util::Point;
use log::debug;
use std::collections::HashMap;

/// Runtime settings for the pen tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSettings {
    pub min_point_spacing: f64,
    pub close_threshold: f64,
    pub indicator_radius: f64,
    pub indicator_active_radius: f64,
    pub indicator_color: Color,
    pub indicator_active_color: Color,
    pub preview_color: Color,
    /// Hit tolerance given to finished paths
    pub hit_tolerance: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PathSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            min_point_spacing: cfg.path.min_point_spacing,
            close_threshold: cfg.path.close_threshold,
            indicator_radius: cfg.path.indicator_radius,
            indicator_active_radius: cfg.path.indicator_active_radius,
            indicator_color: Color::from_rgba(cfg.path.indicator_color),
            indicator_active_color: Color::from_rgba(cfg.path.indicator_active_color),
            preview_color: Color::from_rgba(cfg.path.preview_color),
            hit_tolerance: cfg.shapes.hit_tolerance,
        }
    }
}

/// Preview entities and accepted points of the path being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDraft {
    points: Vec<Point>,
    /// Last known pointer position, for the rubber band
    pointer: Point,
    polyline: EntityId,
    rubber_band: EntityId,
    indicator: EntityId,
    indicator_active: bool,
    /// Whether the most recent press appended a point
    last_press_appended: bool,
}

impl PathDraft {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn indicator(&self) -> EntityId {
        self.indicator
    }

    pub fn indicator_active(&self) -> bool {
        self.indicator_active
    }

    fn preview_ids(&self) -> [EntityId; 3] {
        [self.polyline, self.rubber_band, self.indicator]
    }
}

/// Pen tool state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PathState {
    Idle,
    Drawing(PathDraft),
}

/// How a path was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finish {
    Closed,
    Open,
}

#[derive(Debug)]
pub struct PathTool {
    settings: PathSettings,
    state: PathState,
    /// Original flags of every entity whose interaction is suspended
    suspended: HashMap<EntityId, InteractionFlags>,
}

impl PathTool {
    pub fn new(settings: PathSettings) -> Self {
        Self {
            settings,
            state: PathState::Idle,
            suspended: HashMap::new(),
        }
    }

    pub fn state(&self) -> &PathState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, PathState::Drawing(_))
    }

    pub fn draft(&self) -> Option<&PathDraft> {
        match &self.state {
            PathState::Drawing(draft) => Some(draft),
            PathState::Idle => None,
        }
    }

    /// Suspends selection and event routing on every permanent entity.
    ///
    /// Idempotent: entities already in the side table keep their saved
    /// flags, so calling this again after a restore only re-suspends.
    pub fn suspend_all(&mut self, scene: &mut Scene) {
        let targets: Vec<(EntityId, InteractionFlags)> = scene
            .permanent_entities()
            .map(|entity| (entity.id, entity.flags))
            .collect();

        for (id, flags) in targets {
            let original = *self.suspended.entry(id).or_insert(flags);
            scene.set_flags(
                id,
                InteractionFlags {
                    selectable: false,
                    evented: false,
                    ..original
                },
            );
        }
        debug!("Suspended interaction on {} entities", self.suspended.len());
    }

    /// Writes the saved flags back but keeps the side table, so the scene
    /// shows its document flags until [`PathTool::resuspend`] runs.
    pub(crate) fn lift(&self, scene: &mut Scene) {
        for (id, flags) in &self.suspended {
            scene.set_flags(*id, *flags);
        }
    }

    /// Re-applies suspension to the entities in the side table.
    pub(crate) fn resuspend(&self, scene: &mut Scene) {
        for (id, original) in &self.suspended {
            scene.set_flags(
                *id,
                InteractionFlags {
                    selectable: false,
                    evented: false,
                    ..*original
                },
            );
        }
    }

    /// Rebuilds the side table after the scene was reconstructed from a
    /// snapshot. Restored entities carry their document flags.
    pub(crate) fn suspend_restored(&mut self, scene: &mut Scene) {
        self.suspended.clear();
        self.suspend_all(scene);
    }

    /// Cancels any path in progress and writes the saved flags back.
    pub fn disable(&mut self, scene: &mut Scene) {
        self.cancel(scene);
        let restored = self.suspended.len();
        for (id, flags) in self.suspended.drain() {
            scene.set_flags(id, flags);
        }
        debug!("Restored interaction on {} entities", restored);
    }

    /// Single transition function for pointer input. The pen tool captures
    /// every pointer event while enabled.
    pub fn handle(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> Capture {
        match event {
            PointerEvent::Press(point) => self.press(point, ctx),
            PointerEvent::Move(point) => self.pointer_moved(point, ctx.scene),
            PointerEvent::DoublePress(_) => self.double_press(ctx),
            PointerEvent::Release(_) => {}
        }
        Capture::Captured
    }

    fn press(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        let PathState::Drawing(draft) = &mut self.state else {
            self.start(point, ctx);
            return;
        };

        draft.pointer = point;
        if closes_path(&self.settings, &draft.points, point) {
            self.finish(Finish::Closed, ctx);
            return;
        }

        let too_close = draft
            .points
            .last()
            .is_some_and(|last| point.distance_to(*last) < self.settings.min_point_spacing);
        if too_close {
            draft.last_press_appended = false;
            return;
        }

        draft.points.push(point);
        draft.last_press_appended = true;
        sync_previews(&self.settings, draft, ctx.scene);
    }

    fn start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        let settings = &self.settings;
        let preview_style = Style {
            fill: TRANSPARENT,
            stroke: settings.preview_color,
            stroke_width: ctx.style.stroke_width,
        };

        let polyline = ctx.scene.add_provisional(
            Shape::Path {
                points: vec![point],
                closed: false,
            },
            preview_style,
        );
        let rubber_band = ctx.scene.add_provisional(
            Shape::Line {
                from: point,
                to: point,
            },
            preview_style,
        );
        let indicator = ctx.scene.add_provisional(
            Shape::Circle {
                center: point,
                radius: settings.indicator_radius,
            },
            indicator_style(settings.indicator_color),
        );

        self.state = PathState::Drawing(PathDraft {
            points: vec![point],
            pointer: point,
            polyline,
            rubber_band,
            indicator,
            indicator_active: false,
            last_press_appended: true,
        });
        debug!("Path started at ({}, {})", point.x, point.y);
    }

    fn pointer_moved(&mut self, point: Point, scene: &mut Scene) {
        if let PathState::Drawing(draft) = &mut self.state {
            draft.pointer = point;
            sync_previews(&self.settings, draft, scene);
        }
    }

    fn double_press(&mut self, ctx: &mut ToolContext<'_>) {
        let PathState::Drawing(draft) = &mut self.state else {
            return;
        };
        if draft.last_press_appended && draft.points.len() > 1 {
            draft.points.pop();
        }
        self.finish(Finish::Open, ctx);
    }

    /// Finishes the path as open. Returns false when no path is in progress.
    pub fn finish_open(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.finish(Finish::Open, ctx);
        true
    }

    /// Drops the most recent point while more than one remains.
    pub fn remove_last_point(&mut self, scene: &mut Scene) -> bool {
        let PathState::Drawing(draft) = &mut self.state else {
            return false;
        };
        if draft.points.len() > 1 {
            draft.points.pop();
            draft.last_press_appended = false;
            sync_previews(&self.settings, draft, scene);
        }
        true
    }

    /// Discards points and previews without creating an entity.
    pub fn cancel(&mut self, scene: &mut Scene) -> bool {
        match std::mem::replace(&mut self.state, PathState::Idle) {
            PathState::Drawing(draft) => {
                for id in draft.preview_ids() {
                    scene.remove_entity(id);
                }
                debug!("Path cancelled with {} points", draft.points.len());
                true
            }
            PathState::Idle => false,
        }
    }

    fn finish(&mut self, finish: Finish, ctx: &mut ToolContext<'_>) {
        let PathState::Drawing(draft) = std::mem::replace(&mut self.state, PathState::Idle) else {
            return;
        };
        for id in draft.preview_ids() {
            ctx.scene.remove_entity(id);
        }

        if draft.points.len() < 2 {
            debug!("Path discarded with {} points", draft.points.len());
            return;
        }

        let closed = finish == Finish::Closed;
        let mut style = ctx.style;
        if !closed {
            style.fill = TRANSPARENT;
        }
        let count = draft.points.len();
        let id = ctx.scene.add_entity(
            Shape::Path {
                points: draft.points,
                closed,
            },
            style,
            InteractionFlags::interactive(self.settings.hit_tolerance),
        );
        debug!(
            "Path {} finished ({}, {} points)",
            id,
            if closed { "closed" } else { "open" },
            count
        );
    }
}

/// A press closes the path when it lands near the first point of a path
/// with at least three points.
fn closes_path(settings: &PathSettings, points: &[Point], point: Point) -> bool {
    points.len() >= 3
        && points
            .first()
            .is_some_and(|first| point.distance_to(*first) <= settings.close_threshold)
}

fn indicator_style(color: Color) -> Style {
    Style {
        fill: color,
        stroke: color,
        stroke_width: 1.0,
    }
}

/// Redraws polyline, rubber band and start indicator from the draft.
fn sync_previews(settings: &PathSettings, draft: &mut PathDraft, scene: &mut Scene) {
    let points = draft.points.clone();
    let last = points.last().copied().unwrap_or(draft.pointer);
    let pointer = draft.pointer;

    scene.update_provisional(draft.polyline, |entity| {
        entity.shape = Shape::Path {
            points,
            closed: false,
        };
    });
    scene.update_provisional(draft.rubber_band, |entity| {
        entity.shape = Shape::Line {
            from: last,
            to: pointer,
        };
    });

    draft.indicator_active = closes_path(settings, &draft.points, pointer);
    let (radius, color) = if draft.indicator_active {
        (settings.indicator_active_radius, settings.indicator_active_color)
    } else {
        (settings.indicator_radius, settings.indicator_color)
    };
    scene.update_provisional(draft.indicator, |entity| {
        if let Shape::Circle { radius: r, .. } = &mut entity.shape {
            *r = radius;
        }
        entity.style = indicator_style(color);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(scene: &mut Scene) -> ToolContext<'_> {
        ToolContext {
            scene,
            style: Style::default(),
        }
    }

    fn press(tool: &mut PathTool, scene: &mut Scene, x: f64, y: f64) {
        tool.handle(PointerEvent::Press(Point::new(x, y)), &mut ctx(scene));
    }

    #[test]
    fn suspend_is_idempotent_and_restores_verbatim() {
        let mut scene = Scene::new();
        let original = InteractionFlags::interactive(3.0);
        let id = scene.add_entity(
            Shape::Rect {
                x: 0.0,
                y: 0.0,
                width: 5.0,
                height: 5.0,
            },
            Style::default(),
            original,
        );

        let mut tool = PathTool::new(PathSettings::default());
        tool.suspend_all(&mut scene);
        tool.suspend_all(&mut scene);
        let suspended = scene.get(id).unwrap().flags;
        assert!(!suspended.selectable);
        assert!(!suspended.evented);
        assert_eq!(suspended.hit_tolerance, 3.0);

        tool.disable(&mut scene);
        assert_eq!(scene.get(id).unwrap().flags, original);
    }

    #[test]
    fn spacing_rejection_is_strict() {
        let mut scene = Scene::new();
        let mut tool = PathTool::new(PathSettings::default());
        press(&mut tool, &mut scene, 0.0, 0.0);
        press(&mut tool, &mut scene, 4.9, 0.0);
        assert_eq!(tool.draft().unwrap().points().len(), 1);

        press(&mut tool, &mut scene, 5.0, 0.0);
        assert_eq!(tool.draft().unwrap().points().len(), 2);
    }

    #[test]
    fn closing_needs_three_points() {
        let mut scene = Scene::new();
        let mut tool = PathTool::new(PathSettings::default());
        press(&mut tool, &mut scene, 0.0, 0.0);
        press(&mut tool, &mut scene, 50.0, 0.0);
        // Near the start but only two points: appended like any other press
        press(&mut tool, &mut scene, 10.0, 0.0);
        assert_eq!(tool.draft().unwrap().points().len(), 3);

        press(&mut tool, &mut scene, 1.0, 1.0);
        assert!(!tool.is_drawing());
        let path = scene.permanent_entities().next().unwrap();
        assert_eq!(
            path.shape,
            Shape::Path {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(50.0, 0.0),
                    Point::new(10.0, 0.0)
                ],
                closed: true,
            }
        );
    }

    #[test]
    fn cancel_leaves_no_previews() {
        let mut scene = Scene::new();
        let mut tool = PathTool::new(PathSettings::default());
        press(&mut tool, &mut scene, 0.0, 0.0);
        press(&mut tool, &mut scene, 20.0, 0.0);
        assert_eq!(scene.len(), 3);

        assert!(tool.cancel(&mut scene));
        assert!(scene.is_empty());
        assert!(!tool.cancel(&mut scene));
    }
}
