//! Editor state: scene, history, active tool and readout.

use super::path::{PathSettings, PathTool};
use super::readout::{DimensionReadout, Dimensions};
use super::sizing::{self, ShapeTool};
use crate::config::{Action, Config, KeyBinding};
use crate::draw::{Shape, Style};
use crate::history::{History, HistorySettings};
use crate::input::{
    modifiers::Modifiers,
    style::StyleSource,
    tool::{ShapeKind, Tool, ToolContext},
};
use crate::scene::{EntityId, MutationKind, Scene, SceneEvent};
use crate::util::Point;
use log::{debug, info};
use std::collections::HashMap;
use std::time::Instant;

/// Tool that currently owns pointer input.
///
/// Holding the tool state inside the variant means two capturing tools can
/// never be active together.
#[derive(Debug)]
pub enum ActiveTool {
    Select,
    Path(PathTool),
    Shape(ShapeTool),
}

/// Ordinary drag-to-move of the selected entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MoveDrag {
    pub entity: EntityId,
    pub last: Point,
}

/// Interactive editing session over a single scene.
///
/// The editor receives host input, routes it to the active tool (or to
/// ordinary selection and movement), then drains the scene's notifications:
/// mutations go to the history journal and selection changes refresh the
/// dimension readout.
pub struct Editor {
    pub(crate) scene: Scene,
    pub(crate) history: History,
    pub(crate) tool: ActiveTool,
    /// Current modifier key state
    pub modifiers: Modifiers,
    pub(crate) readout: DimensionReadout,
    pub(crate) drag: Option<MoveDrag>,
    /// Whether the surface needs to be redrawn
    pub needs_redraw: bool,
    action_map: HashMap<KeyBinding, Action>,
    style_source: Option<Box<dyn StyleSource>>,
    fallback_style: Style,
    path_settings: PathSettings,
    hit_tolerance: f64,
}

impl Editor {
    /// Creates an editor over an empty scene.
    ///
    /// History recording starts immediately when the config asks for it.
    pub fn new(config: &Config, action_map: HashMap<KeyBinding, Action>) -> Self {
        let mut editor = Self {
            scene: Scene::new(),
            history: History::new(HistorySettings::from(&config.history)),
            tool: ActiveTool::Select,
            modifiers: Modifiers::new(),
            readout: DimensionReadout::new(),
            drag: None,
            needs_redraw: true,
            action_map,
            style_source: None,
            fallback_style: Style::from(&config.style),
            path_settings: PathSettings::from(config),
            hit_tolerance: config.shapes.hit_tolerance,
        };

        if config.history.enabled_on_start {
            editor.enable_history();
        }
        editor
    }

    /// Creates an editor, building the keybinding map from the config.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let action_map = config.keybindings.build_action_map()?;
        Ok(Self::new(config, action_map))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn readout(&self) -> &DimensionReadout {
        &self.readout
    }

    pub fn active_tool(&self) -> Tool {
        match &self.tool {
            ActiveTool::Select => Tool::Select,
            ActiveTool::Path(_) => Tool::Path,
            ActiveTool::Shape(tool) => Tool::Shape(tool.kind()),
        }
    }

    /// The pen tool, while it is enabled.
    pub fn path_tool(&self) -> Option<&PathTool> {
        match &self.tool {
            ActiveTool::Path(tool) => Some(tool),
            _ => None,
        }
    }

    /// The drag-to-create tool, while it is enabled.
    pub fn shape_tool(&self) -> Option<&ShapeTool> {
        match &self.tool {
            ActiveTool::Shape(tool) => Some(tool),
            _ => None,
        }
    }

    /// Attaches the paint source queried when tools create entities.
    pub fn set_style_source(&mut self, source: Box<dyn StyleSource>) {
        self.style_source = Some(source);
    }

    /// Detaches the paint source; the configured fallback style applies again.
    pub fn clear_style_source(&mut self) {
        self.style_source = None;
    }

    pub(crate) fn current_style(&self) -> Style {
        match &self.style_source {
            Some(source) => source.style(),
            None => self.fallback_style,
        }
    }

    /// Splits the editor into the active tool and the context it may touch.
    pub(crate) fn tool_and_context(&mut self) -> (&mut ActiveTool, ToolContext<'_>) {
        let style = self.current_style();
        (
            &mut self.tool,
            ToolContext {
                scene: &mut self.scene,
                style,
            },
        )
    }

    /// Look up an action for the given key and the held modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map.iter().find_map(|(binding, action)| {
            binding
                .matches(
                    key_str,
                    self.modifiers.primary(),
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
                .then_some(*action)
        })
    }

    // ------------------------------------------------------------------
    // Notification routing
    // ------------------------------------------------------------------

    /// Drains scene notifications: mutations feed the journal, selection
    /// changes (and any edit of the selection) refresh the readout.
    pub(crate) fn pump_events(&mut self) {
        let events = self.scene.take_events();
        if events.is_empty() {
            self.refresh_readout();
            return;
        }

        let now = Instant::now();
        for event in &events {
            match event {
                SceneEvent::SelectionChanged(selection) => {
                    debug!("Selection changed to {:?}", selection);
                }
                _ => self.history.observe(event, now),
            }
        }
        self.refresh_readout();
        self.needs_redraw = true;
    }

    /// Recomputes the readout from the live sizing gesture or the selection.
    fn refresh_readout(&mut self) {
        let sizing = self.shape_tool().and_then(|tool| tool.sizing_entity());
        let target = sizing.or_else(|| self.scene.active_entity());

        let shown = target.and_then(|id| {
            let entity = self.scene.get(id)?;
            Dimensions::of(&entity.shape).map(|dims| (id, dims))
        });

        match shown {
            Some((id, dims)) => self.readout.show(id, dims),
            None => self.readout.hide(),
        }
    }

    /// Timer callback; records a pending history entry once its coalescing
    /// window has elapsed. Returns true when an entry was recorded.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.history.has_pending() {
            return false;
        }
        self.lift_suspension();
        let recorded = self.history.tick(now, &self.scene);
        self.reapply_suspension();
        recorded
    }

    /// Shows document flags while the journal captures the scene.
    fn lift_suspension(&mut self) {
        if let ActiveTool::Path(tool) = &self.tool {
            tool.lift(&mut self.scene);
        }
    }

    fn reapply_suspension(&mut self) {
        if let ActiveTool::Path(tool) = &self.tool {
            tool.resuspend(&mut self.scene);
        }
    }

    // ------------------------------------------------------------------
    // Tool control
    // ------------------------------------------------------------------

    /// Enables the pen tool. No-op when it is already enabled.
    pub fn enable_path_tool(&mut self) {
        if matches!(self.tool, ActiveTool::Path(_)) {
            return;
        }
        self.disable_tool();

        self.drag = None;
        self.scene.set_active_entity(None);
        let mut tool = PathTool::new(self.path_settings);
        tool.suspend_all(&mut self.scene);
        self.tool = ActiveTool::Path(tool);
        self.pump_events();
        info!("Path tool enabled");
    }

    /// Enables drag-to-create for `kind`. Same kind again is a no-op; another
    /// tool is fully disabled first.
    pub fn enable_shape_tool(&mut self, kind: ShapeKind) {
        if self.shape_tool().is_some_and(|tool| tool.kind() == kind) {
            return;
        }
        self.disable_tool();

        self.tool = ActiveTool::Shape(ShapeTool::new(kind, self.hit_tolerance));
        self.needs_redraw = true;
        info!("{:?} tool enabled", kind);
    }

    /// Returns to plain selection, cancelling any gesture in progress.
    /// Safe in any state.
    pub fn disable_tool(&mut self) {
        match std::mem::replace(&mut self.tool, ActiveTool::Select) {
            ActiveTool::Select => return,
            ActiveTool::Path(mut tool) => {
                tool.disable(&mut self.scene);
                info!("Path tool disabled");
            }
            ActiveTool::Shape(mut tool) => {
                tool.cancel(&mut self.scene);
                info!("{:?} tool disabled", tool.kind());
            }
        }
        self.needs_redraw = true;
        self.pump_events();
    }

    /// Abandons the current gesture without changing the active tool.
    pub(crate) fn cancel_gesture(&mut self) -> bool {
        self.drag = None;
        let cancelled = match &mut self.tool {
            ActiveTool::Select => false,
            ActiveTool::Path(tool) => tool.cancel(&mut self.scene),
            ActiveTool::Shape(tool) => {
                let sizing = tool.sizing_entity().is_some();
                tool.cancel(&mut self.scene);
                sizing
            }
        };
        if cancelled {
            self.needs_redraw = true;
        }
        cancelled
    }

    // ------------------------------------------------------------------
    // History control
    // ------------------------------------------------------------------

    pub fn enable_history(&mut self) {
        self.lift_suspension();
        self.history.enable(&self.scene);
        self.reapply_suspension();
    }

    pub fn disable_history(&mut self) {
        self.history.disable();
    }

    /// Steps back one history entry. Returns true when the scene was restored.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.pump_events();
        self.lift_suspension();
        let restored = self.history.undo(&mut self.scene);
        self.after_restore(restored);
        restored
    }

    /// Re-applies the most recently undone entry. Returns true when the scene
    /// was restored.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        self.pump_events();
        self.lift_suspension();
        let restored = self.history.redo(&mut self.scene);
        self.after_restore(restored);
        restored
    }

    /// Expects the pen tool's suspension to be lifted.
    fn after_restore(&mut self, restored: bool) {
        if !restored {
            self.reapply_suspension();
            return;
        }
        // Reconstructed entities come back with their document flags
        if let ActiveTool::Path(tool) = &mut self.tool {
            tool.suspend_restored(&mut self.scene);
        }
        self.pump_events();
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Numeric edit
    // ------------------------------------------------------------------

    /// Writes new dimensions into the selected rectangle or ellipse.
    ///
    /// Ignored when nothing suitable is selected, when the kind does not
    /// match, or when a value is negative or not finite.
    pub fn commit_dimensions(&mut self, dims: Dimensions) -> bool {
        if !dims.is_valid() {
            debug!("Ignoring invalid dimensions {:?}", dims);
            return false;
        }
        let Some(id) = self.scene.active_entity() else {
            return false;
        };
        let matches_kind = self.scene.get(id).is_some_and(|entity| {
            matches!(
                (&entity.shape, dims),
                (Shape::Rect { .. }, Dimensions::Rect { .. })
                    | (Shape::Ellipse { .. }, Dimensions::Ellipse { .. })
            )
        });
        if !matches_kind {
            debug!("Ignoring {:?} for entity {}", dims, id);
            return false;
        }

        let committed = self
            .scene
            .modify_entity(id, MutationKind::Modified, |entity| {
                if let Some(origin) = sizing::extent_origin(&entity.shape) {
                    sizing::apply_extent(&mut entity.shape, origin, dims.rounded());
                }
            });
        self.pump_events();
        committed
    }
}
