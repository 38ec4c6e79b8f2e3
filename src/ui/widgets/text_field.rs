//! TextField widget - a single-line text input field

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::edit_filter::{AcceptAll, EditFilter};
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::{mouse_position, EventResult};
use crate::ui::widget_tree::{EventPhase, TreeWidget};

/// A single-line text input widget
///
/// Every insertion (typed character, paste, `set_text`) passes through the
/// field's [`EditFilter`] before it reaches the buffer.
pub struct TextField {
    /// Text content
    text: String,
    /// Cursor position (character index)
    cursor_pos: usize,
    /// Horizontal scroll offset (characters)
    scroll_offset: usize,
    /// Selection anchor (if any)
    selection_anchor: Option<usize>,
    filter: Box<dyn EditFilter>,
    /// Insertions the filter trimmed since the owner last asked
    rejected_edits: usize,
    /// Whether widget has focus
    focused: bool,
    /// Action prefix for events
    action_prefix: String,
    min_width: u16,
}

impl TextField {
    pub fn new(action_prefix: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            selection_anchor: None,
            filter: Box::new(AcceptAll),
            rejected_edits: 0,
            focused: false,
            action_prefix: action_prefix.into(),
            min_width: 1,
        }
    }

    pub fn with_filter(mut self, filter: impl EditFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = width;
        self
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole buffer. The text is filtered but the trim does not
    /// count as a rejected edit.
    pub fn set_text(&mut self, text: &str) {
        self.text = self.filter.filter(text).text;
        self.cursor_pos = self.char_len();
        self.selection_anchor = None;
        self.scroll_offset = 0;
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of insertions trimmed by the filter since the last call
    pub fn take_rejected_edits(&mut self) -> usize {
        std::mem::take(&mut self.rejected_edits)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Scroll offset that keeps the cursor inside `visible_width` columns
    fn offset_for_width(&self, visible_width: usize) -> usize {
        if visible_width == 0 {
            return self.scroll_offset;
        }
        // Leave one column at the end for the cursor
        let usable_width = visible_width.saturating_sub(1);
        if self.cursor_pos < self.scroll_offset {
            self.cursor_pos
        } else if self.cursor_pos > self.scroll_offset + usable_width {
            self.cursor_pos - usable_width
        } else {
            self.scroll_offset
        }
    }

    /// Get the selected range (if any)
    fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_anchor
            .filter(|anchor| *anchor != self.cursor_pos)
            .map(|anchor| (anchor.min(self.cursor_pos), anchor.max(self.cursor_pos)))
    }

    /// Get selected text
    pub fn selected_text(&self) -> Option<&str> {
        self.selection_range()
            .map(|(start, end)| &self.text[self.byte_index(start)..self.byte_index(end)])
    }

    /// Delete selected text
    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection_anchor = None;
            return false;
        };
        let range = self.byte_index(start)..self.byte_index(end);
        self.text.replace_range(range, "");
        self.cursor_pos = start;
        self.selection_anchor = None;
        true
    }

    fn start_selection(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor_pos);
        }
    }

    fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    /// Select all text, leaving the cursor at the end
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor_pos = self.char_len();
    }

    /// Insert text at the cursor, replacing any selection.
    ///
    /// The selection is replaced even when the filter leaves nothing to
    /// insert.
    pub fn insert_str(&mut self, inserted: &str) {
        let filtered = self.filter.filter(inserted);
        if filtered.rejected {
            self.rejected_edits += 1;
            tracing::debug!(inserted, kept = %filtered.text, "edit filter trimmed insertion");
        }
        self.delete_selection();
        let at = self.byte_index(self.cursor_pos);
        self.text.insert_str(at, &filtered.text);
        self.cursor_pos += filtered.text.chars().count();
    }

    /// Delete character before cursor (backspace)
    fn backspace(&mut self) {
        if self.delete_selection() || self.cursor_pos == 0 {
            return;
        }
        self.cursor_pos -= 1;
        let at = self.byte_index(self.cursor_pos);
        self.text.remove(at);
    }

    /// Delete character at cursor (delete)
    fn delete(&mut self) {
        if self.delete_selection() || self.cursor_pos >= self.char_len() {
            return;
        }
        let at = self.byte_index(self.cursor_pos);
        self.text.remove(at);
    }

    fn move_to(&mut self, pos: usize, keep_selection: bool) {
        if keep_selection {
            self.start_selection();
        } else {
            self.clear_selection();
        }
        self.cursor_pos = pos.min(self.char_len());
    }

    fn move_left(&mut self, keep_selection: bool) {
        // Collapsing a selection lands on its start
        if let (false, Some((start, _))) = (keep_selection, self.selection_range()) {
            self.move_to(start, false);
            return;
        }
        self.move_to(self.cursor_pos.saturating_sub(1), keep_selection);
    }

    fn move_right(&mut self, keep_selection: bool) {
        if let (false, Some((_, end))) = (keep_selection, self.selection_range()) {
            self.move_to(end, false);
            return;
        }
        self.move_to(self.cursor_pos + 1, keep_selection);
    }

    fn move_word(&mut self, forward: bool) {
        let chars: Vec<char> = self.text.chars().collect();
        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        let mut pos = self.cursor_pos;
        if forward {
            while pos < chars.len() && is_word(chars[pos]) {
                pos += 1;
            }
            while pos < chars.len() && !is_word(chars[pos]) {
                pos += 1;
            }
        } else {
            while pos > 0 && !is_word(chars[pos - 1]) {
                pos -= 1;
            }
            while pos > 0 && is_word(chars[pos - 1]) {
                pos -= 1;
            }
        }
        self.move_to(pos, false);
    }

    fn change(&self) -> EventResult {
        EventResult::Action(format!("{}_change", self.action_prefix))
    }

    fn handle_key(&mut self, event: &InputEvent) -> Option<EventResult> {
        let result = match event {
            InputEvent::Char(ch) => {
                self.insert_str(ch.encode_utf8(&mut [0; 4]));
                self.change()
            }
            InputEvent::Paste(text) => {
                self.insert_str(text);
                self.change()
            }
            InputEvent::Backspace => {
                self.backspace();
                self.change()
            }
            InputEvent::Delete => {
                self.delete();
                self.change()
            }
            InputEvent::CursorLeft => {
                self.move_left(false);
                EventResult::Consumed
            }
            InputEvent::CursorRight => {
                self.move_right(false);
                EventResult::Consumed
            }
            InputEvent::ShiftLeft => {
                self.move_left(true);
                EventResult::Consumed
            }
            InputEvent::ShiftRight => {
                self.move_right(true);
                EventResult::Consumed
            }
            InputEvent::Home => {
                self.move_to(0, false);
                EventResult::Consumed
            }
            InputEvent::End => {
                self.move_to(self.char_len(), false);
                EventResult::Consumed
            }
            InputEvent::ShiftHome => {
                self.move_to(0, true);
                EventResult::Consumed
            }
            InputEvent::ShiftEnd => {
                self.move_to(self.char_len(), true);
                EventResult::Consumed
            }
            InputEvent::CtrlLeft => {
                self.move_word(false);
                EventResult::Consumed
            }
            InputEvent::CtrlRight => {
                self.move_word(true);
                EventResult::Consumed
            }
            InputEvent::CtrlA => {
                self.select_all();
                EventResult::Consumed
            }
            InputEvent::Enter => EventResult::Action(format!("{}_submit", self.action_prefix)),
            _ => return None,
        };
        Some(result)
    }
}

impl TreeWidget for TextField {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let (text_fg, text_bg) = if self.focused {
            (theme.text_field_focused_fg, theme.text_field_focused_bg)
        } else {
            (theme.text_field_fg, theme.text_field_bg)
        };

        let visible_width = bounds.width as usize;
        let offset = self.offset_for_width(visible_width);
        let mut visible = self.text.chars().skip(offset);
        let selection = self.selection_range();

        for i in 0..visible_width {
            let index = offset + i;
            let ch = visible.next().unwrap_or(' ');
            let selected = selection.is_some_and(|(start, end)| index >= start && index < end);

            let (fg, bg) = if self.focused && index == self.cursor_pos && selection.is_none() {
                (theme.text_field_cursor_fg, theme.text_field_cursor_bg)
            } else if selected {
                (theme.text_field_selection_fg, theme.text_field_selection_bg)
            } else {
                (text_fg, text_bg)
            };
            screen.set(bounds.y, bounds.x + i as u16, ch, fg, bg);
        }

        if self.focused {
            let col = bounds.x + (self.cursor_pos - offset).min(visible_width - 1) as u16;
            screen.set_cursor(Some((bounds.y, col)));
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect, phase: EventPhase) -> EventResult {
        if phase != EventPhase::Target {
            return EventResult::Ignored;
        }

        if self.focused {
            if let Some(result) = self.handle_key(event) {
                self.scroll_offset = self.offset_for_width(bounds.width as usize);
                return result;
            }
        }

        // Mouse: place the cursor
        let Some((row, col)) = mouse_position(event) else {
            return EventResult::Ignored;
        };
        if !bounds.contains(row, col) || !matches!(event, InputEvent::MouseClick { .. }) {
            return EventResult::Ignored;
        }
        let click_offset = (col - bounds.x) as usize;
        self.move_to(self.scroll_offset + click_offset, false);
        EventResult::Action(format!("{}_focus", self.action_prefix))
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint {
            min_width: self.min_width,
            min_height: 1,
            flex: 0,
        }
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
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
    use crate::ui::edit_filter::DigitFilter;

    fn digits(text: &str) -> TextField {
        let mut field = TextField::new("line").with_filter(DigitFilter).with_text(text);
        field.set_focus(true);
        field
    }

    fn send(field: &mut TextField, event: InputEvent) -> EventResult {
        field.handle_event(&event, Rect::new(1, 1, 10, 1), EventPhase::Target)
    }

    #[test]
    fn test_typing_filters_and_counts_rejections() {
        let mut field = digits("");
        for ch in "12a3b".chars() {
            send(&mut field, InputEvent::Char(ch));
        }
        assert_eq!(field.text(), "123");
        assert_eq!(field.take_rejected_edits(), 2);
        assert_eq!(field.take_rejected_edits(), 0);
    }

    #[test]
    fn test_paste_is_one_insertion() {
        let mut field = digits("");
        let result = send(&mut field, InputEvent::Paste("4x2y".into()));
        assert_eq!(result, EventResult::Action("line_change".into()));
        assert_eq!(field.text(), "42");
        assert_eq!(field.take_rejected_edits(), 1);
    }

    #[test]
    fn test_rejected_insert_still_replaces_selection() {
        let mut field = digits("1");
        field.select_all();
        send(&mut field, InputEvent::Char('a'));
        assert_eq!(field.text(), "");
        assert_eq!(field.take_rejected_edits(), 1);
    }

    #[test]
    fn test_typing_over_selection() {
        let mut field = digits("1");
        field.select_all();
        assert_eq!(field.selected_text(), Some("1"));
        send(&mut field, InputEvent::Char('7'));
        send(&mut field, InputEvent::Char('5'));
        assert_eq!(field.text(), "75");
    }

    #[test]
    fn test_set_text_is_filtered() {
        let field = digits("a1b2");
        assert_eq!(field.text(), "12");
        assert_eq!(field.cursor_pos(), 2);
    }

    #[test]
    fn test_backspace_delete_and_navigation() {
        let mut field = digits("1234");
        send(&mut field, InputEvent::Backspace);
        assert_eq!(field.text(), "123");
        send(&mut field, InputEvent::Home);
        send(&mut field, InputEvent::Delete);
        assert_eq!(field.text(), "23");
        send(&mut field, InputEvent::ShiftEnd);
        assert_eq!(field.selected_text(), Some("23"));
        send(&mut field, InputEvent::Backspace);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_enter_submits() {
        let mut field = digits("5");
        assert_eq!(send(&mut field, InputEvent::Enter), EventResult::Action("line_submit".into()));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut field = digits("5");
        field.set_focus(false);
        assert_eq!(send(&mut field, InputEvent::Char('1')), EventResult::Ignored);
        assert_eq!(field.text(), "5");
    }

    #[test]
    fn test_click_places_cursor() {
        let mut field = digits("12345");
        let result = send(&mut field, InputEvent::MouseClick { row: 1, col: 3 });
        assert_eq!(result, EventResult::Action("line_focus".into()));
        assert_eq!(field.cursor_pos(), 2);
    }

    #[test]
    fn test_draw_scrolls_to_cursor() {
        let mut screen = Screen::new(10, 1);
        let field = digits("123456789");
        field.draw(&mut screen, Rect::new(1, 1, 4, 1), &Theme::dos_dialog());
        assert_eq!(screen.row_text(1, 1, 3), "789");
    }
}
