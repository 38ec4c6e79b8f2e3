//! Message dialog.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{text_width, Rect};
use crate::ui::theme::Theme;
use crate::ui::widget::EventResult;
use crate::ui::widget_tree::WidgetNode;
use crate::ui::widgets::{Button, Label, Spacer};

use super::{DialogContext, DialogController, DialogResult, DialogWidget};

pub struct MessageDialog {
    dialog: Option<DialogWidget>,
    title: String,
    text: String,
    button_label: String,
    owner: Rect,
    open: bool,
}

impl MessageDialog {
    pub fn new() -> Self {
        Self {
            dialog: None,
            title: String::new(),
            text: String::new(),
            button_label: "OK".to_string(),
            owner: Rect::new(1, 1, 80, 25),
            open: false,
        }
    }

    /// Set the message title and text (call before open)
    pub fn set_message(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.title = title.into();
        self.text = text.into();
        self.dialog = None; // Force rebuild
    }

    pub fn set_button_label(&mut self, label: impl Into<String>) {
        self.button_label = label.into();
        self.dialog = None;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn build_dialog(&self) -> DialogWidget {
        let lines: Vec<&str> = self.text.lines().collect();
        let longest = lines.iter().map(|l| text_width(l)).max().unwrap_or(0);
        let title_len = text_width(&self.title);
        let button_len = text_width(&self.button_label).saturating_add(4);

        let width = longest
            .saturating_add(4)
            .max(title_len.saturating_add(6))
            .max(button_len.saturating_add(4))
            .max(16);
        // Frame, padding, message lines, gap, button row
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(6);

        let mut root = WidgetNode::vstack("root").padding(1);
        for (idx, line) in lines.iter().enumerate() {
            root = root.leaf(format!("line_{}", idx), Label::new(*line));
        }
        let content = root
            .leaf("spacer", Spacer::fixed(1))
            .child(
                WidgetNode::hstack("buttons")
                    .leaf("left_spacer", Spacer::new())
                    .leaf("ok_button", Button::new(self.button_label.clone(), "ok"))
                    .leaf("right_spacer", Spacer::new())
                    .build(),
            )
            .build();

        let mut dialog = DialogWidget::with_theme(self.title.clone(), content, Theme::dos_dialog())
            .with_size(width, height);
        dialog.center_on(self.owner);
        dialog.focus_first();
        dialog
    }

    fn ensure_dialog(&mut self) -> &mut DialogWidget {
        let dialog = match self.dialog.take() {
            Some(dialog) => dialog,
            None => self.build_dialog(),
        };
        self.dialog.insert(dialog)
    }
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogController for MessageDialog {
    fn open(&mut self) {
        self.open = true;
        let owner = self.owner;
        let dialog = self.ensure_dialog();
        dialog.focus_first();
        dialog.center_on(owner);
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn set_owner_bounds(&mut self, owner: Rect) {
        self.owner = owner;
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.center_on(owner);
        }
    }

    fn draw(&mut self, screen: &mut Screen) {
        if !self.open {
            return;
        }
        self.ensure_dialog().draw_with_theme(screen);
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut DialogContext) -> DialogResult {
        if !self.open {
            return DialogResult::Open;
        }
        if let EventResult::Action(action) = self.ensure_dialog().handle_event(event) {
            if matches!(action.as_str(), "ok" | "dialog_cancel") {
                self.open = false;
                return DialogResult::Closed(None);
            }
        }
        DialogResult::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dialogs::Feedback;

    struct Silent;

    impl Feedback for Silent {
        fn invalid_input(&mut self) {}
    }

    fn open_message() -> MessageDialog {
        let mut message = MessageDialog::new();
        message.set_message("Error", "Please enter a line number between 1 and 10.");
        message.set_owner_bounds(Rect::new(1, 1, 80, 25));
        message.open();
        message
    }

    #[test]
    fn test_enter_space_and_escape_close() {
        for event in [InputEvent::Enter, InputEvent::Char(' '), InputEvent::Escape] {
            let mut message = open_message();
            let result = message.handle_event(&event, &mut DialogContext::new(&mut Silent));
            assert_eq!(result, DialogResult::Closed(None), "{:?}", event);
            assert!(!message.is_open());
        }
    }

    #[test]
    fn test_other_keys_keep_it_open() {
        let mut message = open_message();
        let result = message.handle_event(&InputEvent::Char('x'), &mut DialogContext::new(&mut Silent));
        assert_eq!(result, DialogResult::Open);
        assert!(message.is_open());
    }

    #[test]
    fn test_draw_fits_message() {
        let mut screen = Screen::new(80, 25);
        let mut message = open_message();
        message.draw(&mut screen);
        let found = (1..=25).any(|row| {
            screen.row_text(row, 1, 80).contains("Please enter a line number between 1 and 10.")
        });
        assert!(found);
    }
}
