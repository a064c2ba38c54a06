use crate::config::Action;
use crate::input::events::Key;

use super::core::{ActiveTool, Editor};

impl Editor {
    /// Processes a key press event.
    ///
    /// Tracks modifier keys, then looks the key up in the keybinding map.
    /// Returns true when the key was handled and the host should suppress its
    /// default handling.
    ///
    /// Path keys (finish, cancel, remove point) are only consumed while a path
    /// is in progress; undo and redo are always consumed.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return false;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return false;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return false;
            }
            Key::Meta => {
                self.modifiers.meta = true;
                return false;
            }
            _ => {}
        }

        let Some(key_str) = key.binding_name() else {
            return false;
        };
        let Some(action) = self.find_action(&key_str) else {
            return false;
        };

        let handled = self.handle_action(action);
        self.pump_events();
        handled
    }

    /// Handle an action triggered by a keybinding. Returns whether it applied.
    pub(super) fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Undo => {
                self.undo();
                true
            }
            Action::Redo => {
                self.redo();
                true
            }
            Action::FinishPath => {
                let (tool, mut ctx) = self.tool_and_context();
                match tool {
                    ActiveTool::Path(path) => path.finish_open(&mut ctx),
                    _ => false,
                }
            }
            Action::CancelPath => match &mut self.tool {
                ActiveTool::Path(path) => path.cancel(&mut self.scene),
                _ => false,
            },
            Action::RemovePathPoint => match &mut self.tool {
                ActiveTool::Path(path) => path.remove_last_point(&mut self.scene),
                _ => false,
            },
        }
    }

    /// Processes a key release event.
    ///
    /// Only tracks modifier key releases to update the modifier state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            Key::Meta => self.modifiers.meta = false,
            _ => {}
        }
    }
}
