//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the page up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the page down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down/Space
    PageDown,
    /// Jump to the header. Default: g/Home
    ScrollToTop,
    /// Jump to the last card. Default: G/End
    ScrollToBottom,

    // Cards
    /// Expand or collapse the full dependency list. Default: d/Enter
    ToggleDependencies,

    // Application
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}
