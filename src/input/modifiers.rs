//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Tracks which modifier keys are currently held so keybindings can be
/// matched against them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
    /// Meta (Command) key pressed
    pub meta: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the platform's primary shortcut modifier is held.
    ///
    /// Ctrl and Meta are interchangeable so `Ctrl+Z` bindings also fire for
    /// `Cmd+Z`.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}
