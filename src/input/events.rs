//! Generic input event types for host-independent input handling.

/// Generic key representation.
///
/// Hosts map their native key codes to these values before forwarding them
/// to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Return/Enter key
    Enter,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Forward delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt/Option modifier
    Alt,
    /// Meta/Command modifier
    Meta,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used when matching against configured keybindings.
    ///
    /// Returns `None` for modifiers and unknown keys, which never trigger
    /// actions on their own.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Meta | Key::Unknown => return None,
        };
        Some(name.to_string())
    }

    /// Parses a key name as written in keybindings and replay scripts.
    ///
    /// A single character maps to [`Key::Char`]; named keys are matched
    /// case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c));
        }
        let key = match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" | "option" => Key::Alt,
            "meta" | "cmd" | "command" | "super" => Key::Meta,
            _ => return None,
        };
        Some(key)
    }
}


/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Left mouse button (drives tools and selection)
    Left,
    /// Right mouse button (cancels the current gesture)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}
