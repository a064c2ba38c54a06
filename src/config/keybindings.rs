//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system for history and
//! path-construction shortcuts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History
    Undo,
    Redo,

    // Path construction (only while a path is in progress)
    FinishPath,
    CancelPath,
    RemovePathPoint,
}

/// A single keybinding: a key with optional modifiers.
///
/// `ctrl` stands for the platform's primary modifier: a binding written as
/// `Ctrl+Z` (or `Cmd+Z`, `Primary+Z`) fires for either Ctrl or Meta.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order: "Shift+Ctrl+Z", "Alt+Shift+Ctrl+Z", etc.
    /// Supports spaces around '+' (e.g., "Ctrl + Shift + Z")
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        // Normalize by removing spaces around '+'
        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in s_normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "command" | "meta" | "primary" => ctrl = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// finish_path = ["Enter"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_finish_path")]
    pub finish_path: Vec<String>,

    #[serde(default = "default_cancel_path")]
    pub cancel_path: Vec<String>,

    #[serde(default = "default_remove_path_point")]
    pub remove_path_point: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            finish_path: default_finish_path(),
            cancel_path: default_cancel_path(),
            remove_path_point: default_remove_path_point(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding.clone(), action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        let groups = [
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.finish_path, Action::FinishPath),
            (&self.cancel_path, Action::CancelPath),
            (&self.remove_path_point, Action::RemovePathPoint),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string(), "Ctrl+Shift+Z".to_string()]
}

fn default_finish_path() -> Vec<String> {
    vec!["Enter".to_string()]
}

fn default_cancel_path() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_remove_path_point() -> Vec<String> {
    vec!["Backspace".to_string(), "Delete".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_shift_key() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_primary_modifier_aliases() {
        for text in ["Cmd+Z", "Meta+Z", "Primary+Z", "control+z"] {
            let binding = KeyBinding::parse(text).unwrap();
            assert!(binding.ctrl, "{text} should use the primary modifier");
            assert!(binding.key.eq_ignore_ascii_case("z"));
        }
    }

    #[test]
    fn test_parse_with_spaces() {
        let binding = KeyBinding::parse("Ctrl + Shift + Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert!(binding.matches("Z", true, true, false));
        assert!(binding.matches("z", true, true, false)); // Case insensitive
        assert!(!binding.matches("Z", false, true, false)); // Missing ctrl
        assert!(!binding.matches("Z", true, false, false)); // Missing shift
        assert!(!binding.matches("Y", true, true, false)); // Wrong key
    }

    #[test]
    fn test_build_action_map() {
        let config = KeybindingsConfig::default();
        let map = config.build_action_map().unwrap();

        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let ctrl_shift_z = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(map.get(&ctrl_shift_z), Some(&Action::Redo));

        let delete = KeyBinding::parse("Delete").unwrap();
        assert_eq!(map.get(&delete), Some(&Action::RemovePathPoint));
    }

    #[test]
    fn test_duplicate_with_different_modifier_order() {
        let mut config = KeybindingsConfig::default();
        config.undo = vec!["Ctrl+Shift+U".to_string()];
        config.redo = vec!["Shift+Ctrl+U".to_string()];

        let result = config.build_action_map();
        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
    }
}
