//! Label widget - static text display

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::EventResult;
use crate::ui::widget_tree::{EventPhase, TreeWidget};
use super::button::mnemonic_index;

/// Text alignment for labels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A static text label widget
#[derive(Clone, Debug)]
pub struct Label {
    text: String,
    align: LabelAlign,
    /// If true, use highlight colors from theme (buddy field has focus)
    highlight: bool,
    mnemonic: Option<char>,
    min_width: Option<u16>,
}

impl Label {
    /// Create a new label with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: LabelAlign::Left,
            highlight: false,
            mnemonic: None,
            min_width: None,
        }
    }

    /// Center the text
    pub fn centered(mut self) -> Self {
        self.align = LabelAlign::Center;
        self
    }

    pub fn aligned(mut self, align: LabelAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_mnemonic(mut self, mnemonic: Option<char>) -> Self {
        self.mnemonic = mnemonic;
        self
    }

    /// Set a minimum width (useful for aligning labels)
    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TreeWidget for Label {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        let (fg, bg) = if self.highlight {
            (theme.label_highlight_fg, theme.label_highlight_bg)
        } else {
            (theme.label_fg, theme.label_bg)
        };

        let text_len = self.text.chars().count() as u16;
        let slack = bounds.width.saturating_sub(text_len);
        let x = match self.align {
            LabelAlign::Left => bounds.x,
            LabelAlign::Center => bounds.x + slack / 2,
            LabelAlign::Right => bounds.x + slack,
        };

        // Truncate text if necessary
        let display_text: String = self.text.chars().take(bounds.width as usize).collect();
        screen.write_str(bounds.y, x, &display_text, fg, bg);

        if let Some(i) = mnemonic_index(&display_text, self.mnemonic) {
            if let Some(ch) = display_text.chars().nth(i) {
                screen.set(bounds.y, x + i as u16, ch, theme.hotkey_fg, bg);
            }
        }
    }

    fn handle_event(&mut self, _event: &InputEvent, _bounds: Rect, _phase: EventPhase) -> EventResult {
        // Labels don't handle events
        EventResult::Ignored
    }

    fn size_hint(&self) -> SizeHint {
        let text_width = self.text.chars().count() as u16;
        SizeHint {
            min_width: self.min_width.unwrap_or(text_width).max(text_width),
            min_height: 1,
            flex: 0,
        }
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

    #[test]
    fn test_right_aligned_label() {
        let mut screen = Screen::new(10, 1);
        let label = Label::new("abc").aligned(LabelAlign::Right);
        label.draw(&mut screen, Rect::new(1, 1, 6, 1), &Theme::default());
        assert_eq!(screen.row_text(1, 1, 6), "   abc");
    }

    #[test]
    fn test_highlight_uses_theme_colors() {
        let theme = Theme::dos_dialog();
        let mut screen = Screen::new(10, 1);
        let mut label = Label::new("Line:");
        label.set_highlight(true);
        label.draw(&mut screen, Rect::new(1, 1, 5, 1), &theme);
        assert_eq!(screen.get(1, 1).map(|c| c.bg), Some(theme.label_highlight_bg));
    }
}
