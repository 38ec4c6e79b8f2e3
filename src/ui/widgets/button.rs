//! Button widget - a clickable button

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::{mouse_position, EventResult};
use crate::ui::widget_tree::{EventPhase, TreeWidget};

/// A clickable button widget, drawn DOS style as `< label >`
pub struct Button {
    label: String,
    /// Whether widget has focus
    focused: bool,
    /// Disabled buttons are drawn greyed, skip focus and ignore activation
    enabled: bool,
    /// Action name for clicks
    action_name: String,
    /// Letter drawn in the hotkey color
    mnemonic: Option<char>,
}

impl Button {
    pub fn new(label: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            focused: false,
            enabled: true,
            action_name: action_name.into(),
            mnemonic: None,
        }
    }

    pub fn with_mnemonic(mut self, mnemonic: Option<char>) -> Self {
        self.mnemonic = mnemonic;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focused = false;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Calculate display width
    pub fn display_width(&self) -> u16 {
        // < label >
        self.label.chars().count() as u16 + 4
    }
}

/// Index of the first char of `label` matching `mnemonic`, ignoring case
pub(crate) fn mnemonic_index(label: &str, mnemonic: Option<char>) -> Option<usize> {
    let m = mnemonic?.to_ascii_lowercase();
    label.chars().position(|c| c.to_ascii_lowercase() == m)
}

impl TreeWidget for Button {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let (fg, bg) = if !self.enabled {
            (theme.button_disabled_fg, theme.button_disabled_bg)
        } else if self.focused {
            (theme.button_focused_fg, theme.button_focused_bg)
        } else {
            (theme.button_fg, theme.button_bg)
        };

        let row = bounds.y;
        screen.write_str(row, bounds.x, &format!("< {} >", self.label), fg, bg);

        if self.enabled && !self.focused {
            if let Some(i) = mnemonic_index(&self.label, self.mnemonic) {
                if let Some(ch) = self.label.chars().nth(i) {
                    screen.set(row, bounds.x + 2 + i as u16, ch, theme.hotkey_fg, bg);
                }
            }
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect, phase: EventPhase) -> EventResult {
        if phase != EventPhase::Target || !self.enabled {
            return EventResult::Ignored;
        }

        // Handle keyboard when focused
        if self.focused && matches!(event, InputEvent::Enter | InputEvent::Char(' ')) {
            return EventResult::Action(self.action_name.clone());
        }

        match (event, mouse_position(event)) {
            (InputEvent::MouseClick { .. }, Some((row, col))) if bounds.contains(row, col) => {
                EventResult::Action(self.action_name.clone())
            }
            _ => EventResult::Ignored,
        }
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint {
            min_width: self.display_width(),
            min_height: 1,
            flex: 0,
        }
    }

    fn focusable(&self) -> bool {
        self.enabled
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused && self.enabled;
    }

    fn wants_tight_width(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(button: &mut Button, event: InputEvent) -> EventResult {
        button.handle_event(&event, Rect::new(1, 1, 8, 1), EventPhase::Target)
    }

    #[test]
    fn test_enter_and_space_activate_when_focused() {
        let mut ok = Button::new("OK", "ok");
        assert_eq!(target(&mut ok, InputEvent::Enter), EventResult::Ignored);
        ok.set_focus(true);
        assert_eq!(target(&mut ok, InputEvent::Enter), EventResult::Action("ok".into()));
        assert_eq!(target(&mut ok, InputEvent::Char(' ')), EventResult::Action("ok".into()));
    }

    #[test]
    fn test_disabled_button_ignores_activation() {
        let mut ok = Button::new("OK", "ok");
        ok.set_focus(true);
        ok.set_enabled(false);
        assert!(!ok.focusable());
        assert!(!ok.is_focused());
        assert_eq!(target(&mut ok, InputEvent::MouseClick { row: 1, col: 2 }), EventResult::Ignored);
    }

    #[test]
    fn test_draw_highlights_mnemonic() {
        let theme = Theme::dos_dialog();
        let mut screen = Screen::new(12, 1);
        let cancel = Button::new("Cancel", "cancel").with_mnemonic(Some('c'));
        cancel.draw(&mut screen, Rect::new(1, 1, 10, 1), &theme);
        assert_eq!(screen.row_text(1, 1, 10), "< Cancel >");
        assert_eq!(screen.get(1, 3).map(|c| c.fg), Some(theme.hotkey_fg));
        assert_eq!(screen.get(1, 4).map(|c| c.fg), Some(theme.button_fg));
    }
}
