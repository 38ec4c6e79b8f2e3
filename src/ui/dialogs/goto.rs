//! Go To Line dialog.
//!
//! Asks for a line number in `1..=max`. The field only ever holds ASCII
//! digits; anything else typed or pasted is dropped and the host's
//! invalid-input cue fires. Confirming an out-of-range or unparsable value
//! opens an error popup and leaves the dialog up.

use thiserror::Error;

use crate::error::Result;
use crate::i18n::Strings;
use crate::input::{is_mnemonic, InputEvent};
use crate::screen::Screen;
use crate::ui::edit_filter::DigitFilter;
use crate::ui::layout::{text_width, Rect};
use crate::ui::theme::Theme;
use crate::ui::widget::EventResult;
use crate::ui::widget_tree::WidgetNode;
use crate::ui::widgets::{Button, Label, Spacer, TextField};

use super::{run_modal, DialogContext, DialogController, DialogResult, DialogWidget, MessageDialog, ModalHost};

const LINE_LABEL: [&str; 3] = ["root", "line_row", "line_label"];
const LINE_FIELD: [&str; 3] = ["root", "line_row", "line_field"];
const OK_BUTTON: [&str; 3] = ["root", "buttons_row", "ok_button"];

/// Visible width of the line number field
const FIELD_COLUMNS: u16 = 16;

/// The text is not a line number in `1..=max`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("line number must be between 1 and {max}")]
pub struct InvalidLineNumber {
    pub max: usize,
}

/// Parse `text` as a decimal line number in `1..=max`.
///
/// Empty text, anything but ASCII digits, values that overflow `usize` and
/// values outside the range are all rejected the same way.
pub fn parse_line_number(text: &str, max: usize) -> std::result::Result<usize, InvalidLineNumber> {
    let invalid = InvalidLineNumber { max };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid);
    }
    match text.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(invalid),
    }
}

pub struct GoToDialog {
    strings: Strings,
    dialog: DialogWidget,
    error: MessageDialog,
    open: bool,
    max_line_number_allowed: usize,
    /// `None` until a valid line is confirmed
    result: Option<usize>,
    error_dialog_title: Option<String>,
    initial_text: String,
    /// Focus and select-all wait for the first paint after opening
    pending_focus: bool,
}

impl GoToDialog {
    pub fn new(strings: Strings) -> Self {
        let (width, height) = Self::dialog_size(&strings);
        let content = Self::build_content(&strings);
        let dialog = DialogWidget::with_theme(strings.goto_dialog_title.clone(), content, Theme::dos_dialog())
            .with_size(width, height);
        let mut error = MessageDialog::new();
        error.set_button_label(strings.ok.clone());

        let mut goto = Self {
            strings,
            dialog,
            error,
            open: false,
            // An empty document still has one line
            max_line_number_allowed: 1,
            result: None,
            error_dialog_title: None,
            initial_text: "1".to_string(),
            pending_focus: false,
        };
        goto.reset_field();
        goto
    }

    fn build_content(strings: &Strings) -> WidgetNode {
        let rtl = strings.is_rtl();
        let label = Label::new(strings.line_number.clone()).with_mnemonic(strings.line_number_mnemonic);
        let field = TextField::new("line").with_filter(DigitFilter).min_width(FIELD_COLUMNS);

        WidgetNode::vstack("root")
            .padding(1)
            .child(
                WidgetNode::hstack("line_row")
                    .leaf("line_label", label)
                    .leaf("line_field", field)
                    .spacing(2)
                    .mirrored(rtl)
                    .build(),
            )
            .leaf("spacer1", Spacer::fixed(1))
            .child(
                WidgetNode::hstack("buttons_row")
                    .leaf("btn_spacer_left", Spacer::new())
                    .leaf("ok_button", Button::new(strings.ok.clone(), "ok").with_mnemonic(strings.ok_mnemonic))
                    .leaf(
                        "cancel_button",
                        Button::new(strings.cancel.clone(), "cancel").with_mnemonic(strings.cancel_mnemonic),
                    )
                    .leaf("btn_spacer_right", Spacer::new())
                    .spacing(2)
                    .mirrored(rtl)
                    .build(),
            )
            .build()
    }

    /// Smallest frame that fits the title, the label row and the buttons
    fn dialog_size(strings: &Strings) -> (u16, u16) {
        let line_row = text_width(&strings.line_number).saturating_add(2 + FIELD_COLUMNS);
        // Two buttons, three gaps between them and the outer spacers
        let buttons = text_width(&strings.ok)
            .saturating_add(text_width(&strings.cancel))
            .saturating_add(4 + 4 + 3 * 2);
        let title = text_width(&strings.goto_dialog_title).saturating_add(2);
        // Frame and padding on both sides
        let width = line_row.max(buttons).max(title).saturating_add(4);
        (width, 7)
    }

    pub fn set_max_line_number_allowed(&mut self, max: usize) {
        self.max_line_number_allowed = max;
    }

    pub fn max_line_number_allowed(&self) -> usize {
        self.max_line_number_allowed
    }

    /// Override the error popup title; `None` restores the localized default
    pub fn set_error_dialog_title(&mut self, title: Option<String>) {
        self.error_dialog_title = title;
    }

    pub fn error_dialog_title(&self) -> &str {
        self.error_dialog_title
            .as_deref()
            .unwrap_or(&self.strings.error_dialog_title)
    }

    /// Text the field is reset to each time the dialog opens
    pub fn set_initial_text(&mut self, text: &str) {
        self.initial_text = text.chars().filter(char::is_ascii_digit).collect();
    }

    /// Run the dialog modally on `host` and return the chosen line, or
    /// `None` if it was cancelled.
    pub fn show<H: ModalHost>(&mut self, host: &mut H) -> Result<Option<usize>> {
        run_modal(self, host)
    }

    /// Current contents of the line number field
    pub fn text(&self) -> &str {
        self.dialog
            .content()
            .get_as::<TextField>(&LINE_FIELD)
            .map(TextField::text)
            .unwrap_or_default()
    }

    pub fn is_ok_enabled(&self) -> bool {
        self.dialog
            .content()
            .get_as::<Button>(&OK_BUTTON)
            .is_some_and(Button::is_enabled)
    }

    pub fn is_error_showing(&self) -> bool {
        self.error.is_open()
    }

    /// Bounds of the dialog frame
    pub fn bounds(&self) -> Rect {
        self.dialog.bounds()
    }

    fn field_mut(&mut self) -> Option<&mut TextField> {
        self.dialog.content_mut().get_as_mut::<TextField>(&LINE_FIELD)
    }

    fn reset_field(&mut self) {
        let initial = self.initial_text.clone();
        if let Some(field) = self.field_mut() {
            field.set_text(&initial);
        }
        self.sync_ok_enabled();
    }

    /// OK is enabled exactly when the field is non-empty
    fn sync_ok_enabled(&mut self) {
        let enabled = !self.text().is_empty();
        if let Some(ok) = self.dialog.content_mut().get_as_mut::<Button>(&OK_BUTTON) {
            ok.set_enabled(enabled);
        }
    }

    /// The label lights up while its field has focus
    fn sync_focus_decor(&mut self) {
        let focused = self.dialog.content().is_focused(&LINE_FIELD);
        if let Some(label) = self.dialog.content_mut().get_as_mut::<Label>(&LINE_LABEL) {
            label.set_highlight(focused);
        }
    }

    fn focus_field_select_all(&mut self) {
        self.dialog.content_mut().set_focus(&LINE_FIELD);
        if let Some(field) = self.field_mut() {
            field.select_all();
        }
        self.sync_focus_decor();
    }

    fn apply_pending_focus(&mut self) {
        if std::mem::take(&mut self.pending_focus) {
            self.focus_field_select_all();
        }
    }

    fn confirm(&mut self) -> DialogResult {
        if !self.is_ok_enabled() {
            return DialogResult::Open;
        }
        match parse_line_number(self.text(), self.max_line_number_allowed) {
            Ok(line) => {
                tracing::info!(line, "go-to line accepted");
                self.result = Some(line);
                self.open = false;
                DialogResult::Closed(self.result)
            }
            Err(err) => {
                tracing::info!(text = self.text(), max = err.max, "go-to line rejected");
                self.result = None;
                self.show_error(err);
                DialogResult::Open
            }
        }
    }

    fn cancel(&mut self) -> DialogResult {
        tracing::info!("go-to dialog cancelled");
        self.result = None;
        self.open = false;
        DialogResult::Closed(None)
    }

    fn show_error(&mut self, err: InvalidLineNumber) {
        let message = self.strings.line_number_range(err.max);
        let title = self.error_dialog_title().to_string();
        self.error.set_message(title, message);
        self.error.set_owner_bounds(self.dialog.bounds());
        self.error.open();
    }

    /// Relay one cue per insertion the filter trimmed
    fn drain_rejected_edits(&mut self, ctx: &mut DialogContext) {
        let rejected = self.field_mut().map(TextField::take_rejected_edits).unwrap_or(0);
        for _ in 0..rejected {
            ctx.feedback.invalid_input();
        }
    }
}

impl Default for GoToDialog {
    fn default() -> Self {
        Self::new(Strings::default())
    }
}

impl DialogController for GoToDialog {
    fn open(&mut self) {
        tracing::info!(max = self.max_line_number_allowed, "go-to dialog opened");
        self.open = true;
        self.result = None;
        self.error.close();
        self.reset_field();
        self.dialog.content_mut().set_focus(&[]);
        self.sync_focus_decor();
        self.pending_focus = true;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
        self.result = None;
        self.error.close();
    }

    fn set_owner_bounds(&mut self, owner: Rect) {
        self.dialog.center_on(owner);
        self.error.set_owner_bounds(self.dialog.bounds());
    }

    fn draw(&mut self, screen: &mut Screen) {
        if !self.open {
            return;
        }
        self.sync_focus_decor();
        self.dialog.draw_with_theme(screen);
        self.error.draw(screen);
        // Focus lands once the dialog has been painted
        self.apply_pending_focus();
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut DialogContext) -> DialogResult {
        if !self.open {
            return DialogResult::Open;
        }
        self.apply_pending_focus();

        // The error popup is modal over this dialog
        if self.error.is_open() {
            self.error.handle_event(event, ctx);
            return DialogResult::Open;
        }

        if is_mnemonic(event, self.strings.line_number_mnemonic) {
            self.focus_field_select_all();
            return DialogResult::Open;
        }
        if is_mnemonic(event, self.strings.ok_mnemonic) {
            return self.confirm();
        }
        if is_mnemonic(event, self.strings.cancel_mnemonic) {
            return self.cancel();
        }

        let result = self.dialog.handle_event(event);
        self.drain_rejected_edits(ctx);
        self.sync_ok_enabled();
        self.sync_focus_decor();

        match result {
            EventResult::Action(action) => match action.as_str() {
                "ok" | "line_submit" => self.confirm(),
                "cancel" | "dialog_cancel" => self.cancel(),
                _ => DialogResult::Open,
            },
            _ => DialogResult::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dialogs::Feedback;

    #[derive(Default)]
    struct Cues(usize);

    impl Feedback for Cues {
        fn invalid_input(&mut self) {
            self.0 += 1;
        }
    }

    fn opened(max: usize) -> GoToDialog {
        let mut dialog = GoToDialog::default();
        dialog.set_max_line_number_allowed(max);
        dialog.set_owner_bounds(Rect::new(1, 1, 80, 25));
        dialog.open();
        dialog
    }

    fn send(dialog: &mut GoToDialog, cues: &mut Cues, event: InputEvent) -> DialogResult {
        dialog.handle_event(&event, &mut DialogContext::new(cues))
    }

    #[test]
    fn test_parse_line_number() {
        assert_eq!(parse_line_number("1", 10), Ok(1));
        assert_eq!(parse_line_number("10", 10), Ok(10));
        assert_eq!(parse_line_number("007", 10), Ok(7));
        assert_eq!(parse_line_number("0", 10), Err(InvalidLineNumber { max: 10 }));
        assert_eq!(parse_line_number("11", 10), Err(InvalidLineNumber { max: 10 }));
        assert_eq!(parse_line_number("", 10), Err(InvalidLineNumber { max: 10 }));
        assert_eq!(parse_line_number("+5", 10), Err(InvalidLineNumber { max: 10 }));
        assert!(parse_line_number("99999999999999999999999", usize::MAX).is_err());
        assert_eq!(parse_line_number("1", 0), Err(InvalidLineNumber { max: 0 }));
    }

    #[test]
    fn test_open_resets_state() {
        let mut dialog = opened(10);
        assert_eq!(dialog.text(), "1");
        assert!(dialog.is_ok_enabled());
        assert!(!dialog.is_error_showing());
        assert_eq!(dialog.error_dialog_title(), "Error");
    }

    #[test]
    fn test_first_event_applies_select_all() {
        let mut dialog = opened(10);
        let mut cues = Cues::default();
        // Typing replaces the selected initial "1"
        send(&mut dialog, &mut cues, InputEvent::Char('7'));
        assert_eq!(dialog.text(), "7");
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Enter), DialogResult::Closed(Some(7)));
        assert!(!dialog.is_open());
        assert_eq!(cues.0, 0);
    }

    #[test]
    fn test_letters_cue_and_are_dropped() {
        let mut dialog = opened(100);
        let mut cues = Cues::default();
        send(&mut dialog, &mut cues, InputEvent::Backspace);
        for ch in "12a3b".chars() {
            send(&mut dialog, &mut cues, InputEvent::Char(ch));
        }
        assert_eq!(dialog.text(), "123");
        assert_eq!(cues.0, 2);
    }

    #[test]
    fn test_empty_field_disables_ok() {
        let mut dialog = opened(10);
        let mut cues = Cues::default();
        send(&mut dialog, &mut cues, InputEvent::Backspace);
        assert_eq!(dialog.text(), "");
        assert!(!dialog.is_ok_enabled());
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Enter), DialogResult::Open);
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Alt('o')), DialogResult::Open);
        assert!(dialog.is_open());
        assert!(!dialog.is_error_showing());
    }

    #[test]
    fn test_out_of_range_shows_error_and_stays_open() {
        let mut dialog = opened(10);
        let mut cues = Cues::default();
        send(&mut dialog, &mut cues, InputEvent::Paste("42".into()));
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Enter), DialogResult::Open);
        assert!(dialog.is_error_showing());
        assert!(dialog.error.text().contains("10"));

        // Escape only dismisses the popup
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Escape), DialogResult::Open);
        assert!(!dialog.is_error_showing());
        assert!(dialog.is_open());

        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Escape), DialogResult::Closed(None));
    }

    #[test]
    fn test_mnemonics() {
        let mut dialog = opened(10);
        let mut cues = Cues::default();
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Alt('C')), DialogResult::Closed(None));

        dialog.open();
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Alt('o')), DialogResult::Closed(Some(1)));
    }

    #[test]
    fn test_closed_is_reported_once() {
        let mut dialog = opened(10);
        let mut cues = Cues::default();
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Escape), DialogResult::Closed(None));
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Escape), DialogResult::Open);
        assert_eq!(send(&mut dialog, &mut cues, InputEvent::Enter), DialogResult::Open);
    }

    #[test]
    fn test_tab_skips_disabled_ok() {
        let mut dialog = opened(10);
        let mut cues = Cues::default();
        send(&mut dialog, &mut cues, InputEvent::Backspace);
        send(&mut dialog, &mut cues, InputEvent::Tab);
        assert!(dialog.dialog.content().is_focused(&["root", "buttons_row", "cancel_button"]));
    }

    #[test]
    fn test_initial_text_is_filtered() {
        let mut dialog = GoToDialog::default();
        dialog.set_initial_text("4x2");
        dialog.open();
        assert_eq!(dialog.text(), "42");

        dialog.set_initial_text("");
        dialog.open();
        assert_eq!(dialog.text(), "");
        assert!(!dialog.is_ok_enabled());
    }

    #[test]
    fn test_dialog_fits_label_and_buttons() {
        let dialog = GoToDialog::default();
        let b = dialog.bounds();
        assert_eq!(b.height, 7);
        assert!(b.width >= "Line Number:".len() as u16 + 2 + FIELD_COLUMNS + 4);
    }

    #[test]
    fn test_oversized_strings_saturate_width() {
        let strings = Strings {
            line_number: "L".repeat(70_000),
            cancel: "C".repeat(u16::MAX as usize),
            ..Strings::default()
        };
        assert_eq!(GoToDialog::dialog_size(&strings), (u16::MAX, 7));

        let mut dialog = GoToDialog::new(strings);
        dialog.set_owner_bounds(Rect::new(1, 1, 80, 25));
        dialog.open();
        assert_eq!(dialog.bounds().width, u16::MAX);
    }
}
