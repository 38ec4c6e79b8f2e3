//! Event results and mouse helpers shared by all widgets

use crate::input::InputEvent;

/// Result of handling an event
#[derive(Clone, Debug, PartialEq)]
pub enum EventResult {
    /// Event was handled, stop propagation
    Consumed,
    /// Event was not handled, continue propagation
    Ignored,
    /// Event triggered a named action
    Action(String),
}

impl EventResult {
    /// Check if the event was consumed (either Consumed or Action)
    pub fn is_consumed(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Extract mouse position from an event
pub fn mouse_position(event: &InputEvent) -> Option<(u16, u16)> {
    match event {
        InputEvent::MouseClick { row, col }
        | InputEvent::MouseRelease { row, col }
        | InputEvent::MouseDrag { row, col }
        | InputEvent::ScrollUp { row, col }
        | InputEvent::ScrollDown { row, col } => Some((*row, *col)),
        _ => None,
    }
}
