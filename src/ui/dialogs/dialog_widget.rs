//! DialogWidget - window chrome plus a widget tree for content
//!
//! Draws the shadow, frame and centered title, centers itself on an owner
//! rectangle and routes Escape as `dialog_cancel`. Clicks outside the frame
//! are swallowed: the owner is blocked while the dialog is up.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::widget::{mouse_position, EventResult};
use crate::ui::widget_tree::{WidgetNode, WidgetTree};

/// A modal dialog widget with chrome and content
pub struct DialogWidget {
    title: String,
    bounds: Rect,
    /// The widget tree for content
    content: WidgetTree,
}

impl DialogWidget {
    /// Create with a specific theme
    pub fn with_theme(title: impl Into<String>, content: WidgetNode, theme: Theme) -> Self {
        Self {
            title: title.into(),
            bounds: Rect::new(1, 1, 40, 7),
            content: WidgetTree::with_theme(content, theme),
        }
    }

    /// Set dialog size
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Center the dialog on its owner
    pub fn center_on(&mut self, owner: Rect) {
        self.bounds = Rect::centered_on(owner, self.bounds.width, self.bounds.height);
    }

    /// Area inside the frame
    pub fn content_rect(&self) -> Rect {
        self.bounds.inset(1)
    }

    /// Get mutable access to the widget tree
    pub fn content_mut(&mut self) -> &mut WidgetTree {
        &mut self.content
    }

    /// Get access to the widget tree
    pub fn content(&self) -> &WidgetTree {
        &self.content
    }

    /// Focus the first focusable widget
    pub fn focus_first(&mut self) {
        self.content.set_focus(&[]);
        self.content.focus_next();
    }

    /// Draw the dialog with theme-based colors
    pub fn draw_with_theme(&self, screen: &mut Screen) {
        let theme = self.content.theme();
        let bounds = self.bounds;

        screen.set_cursor(None);
        if theme.dialog_shadow {
            screen.draw_shadow(bounds);
        }
        screen.fill(bounds, ' ', theme.dialog_fg, theme.dialog_bg);
        screen.draw_box(bounds, theme.dialog_border_fg, theme.dialog_border_bg);
        self.draw_title(screen, theme);

        self.content.draw(screen, self.content_rect());
    }

    /// Title text centered on the top border
    fn draw_title(&self, screen: &mut Screen, theme: &Theme) {
        let bounds = self.bounds;
        let max_len = bounds.width.saturating_sub(4) as usize;
        let title: String = self.title.chars().take(max_len).collect();
        if title.is_empty() {
            return;
        }
        let title = format!(" {} ", title);
        let len = title.chars().count() as u16;
        let x = bounds.x + bounds.width.saturating_sub(len) / 2;
        screen.write_str(bounds.y, x, &title, theme.dialog_title_fg, theme.dialog_title_bg);
    }

    /// Handle events
    pub fn handle_event(&mut self, event: &InputEvent) -> EventResult {
        if matches!(event, InputEvent::Escape) {
            return EventResult::Action("dialog_cancel".to_string());
        }

        if let Some((row, col)) = mouse_position(event) {
            if !self.bounds.contains(row, col) {
                return EventResult::Consumed;
            }
        }

        let content_rect = self.content_rect();
        self.content.handle_event(event, content_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::Button;

    fn dialog() -> DialogWidget {
        let content = WidgetNode::vstack("root").leaf("ok", Button::new("OK", "ok")).build();
        let mut dialog = DialogWidget::with_theme("Title", content, Theme::dos_dialog()).with_size(20, 5);
        dialog.center_on(Rect::new(1, 1, 80, 25));
        dialog
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = dialog();
        assert_eq!(dialog.handle_event(&InputEvent::Escape), EventResult::Action("dialog_cancel".into()));
    }

    #[test]
    fn test_click_outside_is_swallowed() {
        let mut dialog = dialog();
        let result = dialog.handle_event(&InputEvent::MouseClick { row: 1, col: 1 });
        assert_eq!(result, EventResult::Consumed);
    }

    #[test]
    fn test_title_centered_on_border() {
        let mut screen = Screen::new(80, 25);
        let dialog = dialog();
        dialog.draw_with_theme(&mut screen);
        let b = dialog.bounds();
        assert_eq!(b, Rect::new(31, 11, 20, 5));
        assert_eq!(screen.row_text(b.y, b.x, b.width), "┌───── Title ──────┐");
    }
}
