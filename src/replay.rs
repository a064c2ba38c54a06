//! Scripted input replay.
//!
//! A replay script is a JSON array of input events. Feeding it to an
//! [`Editor`] exercises the tools and the history journal exactly as host
//! input would, which makes the editor drivable from the command line and
//! from integration tests.
//!
//! ```json
//! [
//!   { "event": "tool", "tool": "rectangle" },
//!   { "event": "press", "x": 10, "y": 10 },
//!   { "event": "move", "x": 50, "y": 40 },
//!   { "event": "release", "x": 50, "y": 40 },
//!   { "event": "tick", "after_ms": 600 },
//!   { "event": "key", "key": "z", "ctrl": true }
//! ]
//! ```

use crate::input::{Dimensions, Editor, Key, MouseButton, ShapeKind};
use crate::scene::{SceneError, Snapshot};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors raised while loading or running a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid replay script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown key '{0}' in replay script")]
    UnknownKey(String),

    #[error("could not capture the final scene: {0}")]
    Snapshot(#[from] SceneError),
}

/// Tool selection as written in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    Select,
    Path,
    Rectangle,
    Ellipse,
}

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Press {
        x: f64,
        y: f64,
        #[serde(default = "left_button")]
        button: MouseButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Release {
        x: f64,
        y: f64,
        #[serde(default = "left_button")]
        button: MouseButton,
    },
    DoublePress {
        x: f64,
        y: f64,
    },
    /// Key press with the modifiers held for its duration
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        meta: bool,
    },
    /// Fires the history timer as if `after_ms` had passed
    Tick {
        after_ms: u64,
    },
    Tool {
        tool: ToolName,
    },
    Undo,
    Redo,
    EnableHistory,
    DisableHistory,
    EditDimensions {
        dimensions: Dimensions,
    },
}

fn left_button() -> MouseButton {
    MouseButton::Left
}

/// Final state after a replay.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub snapshot: Snapshot,
    pub undo_depth: usize,
    pub redo_depth: usize,
    /// Number of key presses the editor consumed
    pub keys_handled: usize,
}

/// Parses a replay script from JSON text.
pub fn parse_script(text: &str) -> Result<Vec<ReplayEvent>, ReplayError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads and parses a replay script file.
pub fn load_script(path: &Path) -> Result<Vec<ReplayEvent>, ReplayError> {
    let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// Feeds every event to `editor` in order and captures the resulting scene.
pub fn run(editor: &mut Editor, events: &[ReplayEvent]) -> Result<ReplayOutcome, ReplayError> {
    let mut keys_handled = 0;

    for event in events {
        debug!("Replaying {:?}", event);
        match event {
            ReplayEvent::Press { x, y, button } => editor.on_mouse_press(*button, *x, *y),
            ReplayEvent::Move { x, y } => editor.on_mouse_motion(*x, *y),
            ReplayEvent::Release { x, y, button } => editor.on_mouse_release(*button, *x, *y),
            ReplayEvent::DoublePress { x, y } => editor.on_double_press(*x, *y),
            ReplayEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => {
                let parsed = Key::from_name(key).ok_or_else(|| ReplayError::UnknownKey(key.clone()))?;
                let held: Vec<Key> = [
                    (*ctrl, Key::Ctrl),
                    (*shift, Key::Shift),
                    (*alt, Key::Alt),
                    (*meta, Key::Meta),
                ]
                .into_iter()
                .filter_map(|(down, modifier)| down.then_some(modifier))
                .collect();

                for modifier in &held {
                    editor.on_key_press(*modifier);
                }
                if editor.on_key_press(parsed) {
                    keys_handled += 1;
                }
                for modifier in &held {
                    editor.on_key_release(*modifier);
                }
            }
            ReplayEvent::Tick { after_ms } => {
                editor.tick(Instant::now() + Duration::from_millis(*after_ms));
            }
            ReplayEvent::Tool { tool } => match tool {
                ToolName::Select => editor.disable_tool(),
                ToolName::Path => editor.enable_path_tool(),
                ToolName::Rectangle => editor.enable_shape_tool(ShapeKind::Rectangle),
                ToolName::Ellipse => editor.enable_shape_tool(ShapeKind::Ellipse),
            },
            ReplayEvent::Undo => {
                editor.undo();
            }
            ReplayEvent::Redo => {
                editor.redo();
            }
            ReplayEvent::EnableHistory => editor.enable_history(),
            ReplayEvent::DisableHistory => editor.disable_history(),
            ReplayEvent::EditDimensions { dimensions } => {
                editor.commit_dimensions(*dimensions);
            }
        }
    }

    let outcome = ReplayOutcome {
        snapshot: editor.scene().snapshot()?,
        undo_depth: editor.history().undo_len(),
        redo_depth: editor.history().redo_len(),
        keys_handled,
    };
    info!(
        "Replayed {} events: undo depth {}, redo depth {}",
        events.len(),
        outcome.undo_depth,
        outcome.redo_depth
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn editor() -> Editor {
        Editor::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn parses_tagged_events_with_defaults() {
        let events = parse_script(
            r#"[
                {"event": "press", "x": 1, "y": 2},
                {"event": "release", "x": 1, "y": 2, "button": "right"},
                {"event": "edit_dimensions", "dimensions": {"kind": "rect", "width": 3, "height": 4}},
                {"event": "undo"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                ReplayEvent::Press {
                    x: 1.0,
                    y: 2.0,
                    button: MouseButton::Left
                },
                ReplayEvent::Release {
                    x: 1.0,
                    y: 2.0,
                    button: MouseButton::Right
                },
                ReplayEvent::EditDimensions {
                    dimensions: Dimensions::Rect {
                        width: 3.0,
                        height: 4.0
                    }
                },
                ReplayEvent::Undo,
            ]
        );
    }

    #[test]
    fn rejects_unknown_event_names() {
        let err = parse_script(r#"[{"event": "teleport"}]"#).unwrap_err();
        assert!(matches!(err, ReplayError::Parse(_)));
    }

    #[test]
    fn unknown_key_stops_replay() {
        let events = parse_script(r#"[{"event": "key", "key": "Hyper"}]"#).unwrap();
        let err = run(&mut editor(), &events).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownKey(ref key) if key == "Hyper"));
    }

    #[test]
    fn replay_draws_and_undoes() {
        let events = parse_script(
            r#"[
                {"event": "tool", "tool": "rectangle"},
                {"event": "press", "x": 10, "y": 10},
                {"event": "move", "x": 50, "y": 40},
                {"event": "release", "x": 50, "y": 40},
                {"event": "tick", "after_ms": 1000},
                {"event": "tool", "tool": "ellipse"},
                {"event": "press", "x": 100, "y": 100},
                {"event": "move", "x": 120, "y": 110},
                {"event": "release", "x": 120, "y": 110},
                {"event": "tick", "after_ms": 1000},
                {"event": "key", "key": "z", "ctrl": true}
            ]"#,
        )
        .unwrap();

        let mut editor = editor();
        let outcome = run(&mut editor, &events).unwrap();
        assert_eq!(outcome.undo_depth, 2);
        assert_eq!(outcome.redo_depth, 1);
        assert_eq!(outcome.keys_handled, 1);
        assert!(outcome.snapshot.as_str().contains(r#""type":"rect""#));
        assert!(!outcome.snapshot.as_str().contains(r#""type":"ellipse""#));
    }
}
