//! Input handling and key event processing

use crate::terminal::{Key, MouseButton, MouseEvent};

/// Processed input events for widgets and dialogs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse click
    MouseClick { row: u16, col: u16 },
    /// Mouse release
    MouseRelease { row: u16, col: u16 },
    /// Mouse drag (move while button held)
    MouseDrag { row: u16, col: u16 },
    /// Mouse wheel scroll
    ScrollUp { row: u16, col: u16 },
    ScrollDown { row: u16, col: u16 },
    /// Regular character input
    Char(char),
    /// Text inserted in one piece (bracketed or clipboard paste)
    Paste(String),
    /// Navigation keys
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Shift+Navigation for selection
    ShiftLeft,
    ShiftRight,
    ShiftHome,
    ShiftEnd,
    CtrlLeft,
    CtrlRight,
    /// Editing keys
    Enter,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Escape,
    /// Alt+letter, used for mnemonics
    Alt(char),
    /// Ctrl shortcuts
    CtrlA, // Select all
    CtrlG, // Go to line
    CtrlQ, // Quit
    CtrlV, // Paste
    /// Other
    Unknown,
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => InputEvent::Char(c),
            Key::Paste(text) => InputEvent::Paste(text),
            Key::Enter => InputEvent::Enter,
            Key::Escape => InputEvent::Escape,
            Key::Backspace => InputEvent::Backspace,
            Key::Delete => InputEvent::Delete,
            Key::Tab => InputEvent::Tab,
            Key::ShiftTab => InputEvent::ShiftTab,
            Key::Up => InputEvent::CursorUp,
            Key::Down => InputEvent::CursorDown,
            Key::Left => InputEvent::CursorLeft,
            Key::Right => InputEvent::CursorRight,
            Key::Home => InputEvent::Home,
            Key::End => InputEvent::End,
            Key::PageUp => InputEvent::PageUp,
            Key::PageDown => InputEvent::PageDown,
            Key::ShiftLeft => InputEvent::ShiftLeft,
            Key::ShiftRight => InputEvent::ShiftRight,
            Key::ShiftHome => InputEvent::ShiftHome,
            Key::ShiftEnd => InputEvent::ShiftEnd,
            Key::CtrlLeft => InputEvent::CtrlLeft,
            Key::CtrlRight => InputEvent::CtrlRight,
            Key::Alt(c) => InputEvent::Alt(c),
            Key::Ctrl('a') => InputEvent::CtrlA,
            Key::Ctrl('g') => InputEvent::CtrlG,
            Key::Ctrl('q') => InputEvent::CtrlQ,
            Key::Ctrl('v') => InputEvent::CtrlV,
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: true, motion: false }) => {
                InputEvent::MouseClick { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: false, .. }) => {
                InputEvent::MouseRelease { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, motion: true, .. }) => {
                InputEvent::MouseDrag { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelUp, row, col, .. }) => {
                InputEvent::ScrollUp { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelDown, row, col, .. }) => {
                InputEvent::ScrollDown { row, col }
            }
            _ => InputEvent::Unknown,
        }
    }
}

/// Check whether an Alt event matches a mnemonic letter (case-insensitive)
pub fn is_mnemonic(event: &InputEvent, mnemonic: Option<char>) -> bool {
    match (event, mnemonic) {
        (InputEvent::Alt(c), Some(m)) => c.eq_ignore_ascii_case(&m),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_keys_map_to_shortcuts() {
        assert_eq!(InputEvent::from(Key::Ctrl('g')), InputEvent::CtrlG);
        assert_eq!(InputEvent::from(Key::Ctrl('v')), InputEvent::CtrlV);
        assert_eq!(InputEvent::from(Key::Ctrl('z')), InputEvent::Unknown);
    }

    #[test]
    fn test_mnemonic_match_ignores_case() {
        assert!(is_mnemonic(&InputEvent::Alt('o'), Some('O')));
        assert!(!is_mnemonic(&InputEvent::Alt('c'), Some('O')));
        assert!(!is_mnemonic(&InputEvent::Char('o'), Some('O')));
        assert!(!is_mnemonic(&InputEvent::Alt('o'), None));
    }
}
