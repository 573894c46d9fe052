//! Abstract input key event, independent of terminal library.
//!
//! The sequence controller and any other consumer of key presses works on
//! `InputKey`, so it can be driven by the terminal surface, by tests, or by
//! any other frontend without depending on crossterm.

/// Abstract input key event, independent of terminal library.
/// Converted from crossterm::event::KeyEvent at the TUI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Keys that close an interactive display
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c')
        )
    }
}
