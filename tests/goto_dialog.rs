//! Drives `GoToDialog::show` through a scripted modal host.

use std::collections::VecDeque;
use std::io;

use goto_dialog::terminal::{parse_keys, Color};
use goto_dialog::{DialogController, Feedback, GoToDialog, InputEvent, ModalHost, Rect, Screen, Strings, TextDirection};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 25;

enum Step {
    Key(InputEvent),
    /// Click the first cell of the first on-screen occurrence of the text
    Click(&'static str),
}

fn typed(text: &str) -> Vec<Step> {
    text.chars().map(|c| Step::Key(InputEvent::Char(c))).collect()
}

fn key(event: InputEvent) -> Vec<Step> {
    vec![Step::Key(event)]
}

/// Keys decoded from one terminal read
fn read(bytes: &[u8]) -> Vec<Step> {
    parse_keys(bytes).into_iter().map(|k| Step::Key(InputEvent::from(k))).collect()
}

fn click(text: &'static str) -> Vec<Step> {
    vec![Step::Click(text)]
}

struct ScriptedHost {
    screen: Screen,
    script: VecDeque<Step>,
    cues: usize,
    /// Text of every presented frame, rows joined by newlines
    frames: Vec<String>,
}

impl ScriptedHost {
    fn new(steps: impl IntoIterator<Item = Vec<Step>>) -> Self {
        Self {
            screen: Screen::new(WIDTH, HEIGHT),
            script: steps.into_iter().flatten().collect(),
            cues: 0,
            frames: Vec::new(),
        }
    }

    fn find(&self, needle: &str) -> Option<(u16, u16)> {
        (1..=HEIGHT).find_map(|row| {
            let text = self.screen.row_text(row, 1, WIDTH);
            text.find(needle).map(|byte| (row, 1 + text[..byte].chars().count() as u16))
        })
    }

    fn any_frame_contains(&self, needle: &str) -> bool {
        self.frames.iter().any(|f| f.contains(needle))
    }

    fn last_frame(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or_default()
    }
}

impl Feedback for ScriptedHost {
    fn invalid_input(&mut self) {
        self.cues += 1;
    }
}

impl ModalHost for ScriptedHost {
    fn owner_bounds(&self) -> Rect {
        Rect::new(1, 1, WIDTH, HEIGHT)
    }

    fn begin_frame(&mut self) -> &mut Screen {
        self.screen.clear_with(Color::LightGray, Color::Blue);
        &mut self.screen
    }

    fn end_frame(&mut self) -> io::Result<()> {
        let text: Vec<String> = (1..=HEIGHT).map(|row| self.screen.row_text(row, 1, WIDTH)).collect();
        self.frames.push(text.join("\n"));
        Ok(())
    }

    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        let event = match self.script.pop_front() {
            None => None,
            Some(Step::Key(event)) => Some(event),
            Some(Step::Click(text)) => {
                let (row, col) = self
                    .find(text)
                    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, text))?;
                Some(InputEvent::MouseClick { row, col })
            }
        };
        Ok(event)
    }
}

fn dialog_with_max(max: usize) -> GoToDialog {
    let mut dialog = GoToDialog::default();
    dialog.set_max_line_number_allowed(max);
    dialog
}

#[test]
fn test_type_and_click_ok_returns_line() {
    let mut dialog = dialog_with_max(100);
    let mut host = ScriptedHost::new([typed("50"), click("< OK >")]);

    assert_eq!(dialog.show(&mut host).unwrap(), Some(50));
    assert!(!dialog.is_open());
    assert_eq!(host.cues, 0);
}

#[test]
fn test_out_of_range_shows_error_and_stays_open() {
    let mut dialog = dialog_with_max(10);
    let mut host = ScriptedHost::new([typed("50"), click("< OK >"), key(InputEvent::Enter)]);

    // Script runs out while the dialog is still up
    assert_eq!(dialog.show(&mut host).unwrap(), None);
    assert!(host.any_frame_contains("Please enter a line number between 1 and 10."));
    assert!(host.any_frame_contains(" Error "));
    assert!(!host.last_frame().contains("between 1 and 10."));
    assert!(host.last_frame().contains(" Go To Line "));
}

#[test]
fn test_non_digits_are_stripped_with_one_cue_each() {
    let mut dialog = dialog_with_max(1000);
    let mut host = ScriptedHost::new([typed("12a3b"), key(InputEvent::Escape)]);

    assert_eq!(dialog.show(&mut host).unwrap(), None);
    assert_eq!(dialog.text(), "123");
    assert_eq!(host.cues, 2);
}

#[test]
fn test_escape_cancels_without_popup() {
    let mut dialog = dialog_with_max(10);
    let mut host = ScriptedHost::new([key(InputEvent::Escape)]);

    assert_eq!(dialog.show(&mut host).unwrap(), None);
    assert!(!host.any_frame_contains(" Error "));
    assert_eq!(host.frames.len(), 1);
}

#[test]
fn test_empty_field_blocks_confirmation() {
    let mut dialog = dialog_with_max(10);
    dialog.set_initial_text("");
    let mut host = ScriptedHost::new([
        click("< OK >"),
        key(InputEvent::Enter),
        key(InputEvent::Alt('o')),
        typed("3"),
        click("< OK >"),
    ]);

    assert_eq!(dialog.show(&mut host).unwrap(), Some(3));
    assert!(!host.any_frame_contains(" Error "));
}

#[test]
fn test_show_resets_between_invocations() {
    let mut dialog = dialog_with_max(10);

    let mut first = ScriptedHost::new([typed("50"), key(InputEvent::Escape)]);
    assert_eq!(dialog.show(&mut first).unwrap(), None);
    assert_eq!(dialog.text(), "50");

    let mut second = ScriptedHost::new([key(InputEvent::Enter)]);
    assert_eq!(dialog.show(&mut second).unwrap(), Some(1));
    assert_eq!(dialog.text(), "1");
}

#[test]
fn test_error_popup_closed_then_valid_retry() {
    let mut dialog = dialog_with_max(10);
    let mut host = ScriptedHost::new([
        typed("50"),
        key(InputEvent::Enter),
        key(InputEvent::Escape),
        key(InputEvent::Alt('l')),
        typed("7"),
        key(InputEvent::Enter),
    ]);

    assert_eq!(dialog.show(&mut host).unwrap(), Some(7));
}

#[test]
fn test_mnemonics_confirm_and_cancel() {
    let mut dialog = dialog_with_max(5);

    let mut ok = ScriptedHost::new([typed("4"), key(InputEvent::Alt('O'))]);
    assert_eq!(dialog.show(&mut ok).unwrap(), Some(4));

    let mut cancel = ScriptedHost::new([typed("4"), key(InputEvent::Alt('c'))]);
    assert_eq!(dialog.show(&mut cancel).unwrap(), None);
}

#[test]
fn test_error_title_override() {
    let mut dialog = dialog_with_max(3);
    dialog.set_error_dialog_title(Some("Oops".to_string()));
    assert_eq!(dialog.error_dialog_title(), "Oops");

    let mut host = ScriptedHost::new([typed("9"), key(InputEvent::Enter)]);
    dialog.show(&mut host).unwrap();
    assert!(host.any_frame_contains(" Oops "));

    dialog.set_error_dialog_title(None);
    assert_eq!(dialog.error_dialog_title(), "Error");
}

#[test]
fn test_paste_is_filtered() {
    let mut dialog = dialog_with_max(500);
    let mut host = ScriptedHost::new([key(InputEvent::Paste("4-2".to_string())), key(InputEvent::Enter)]);

    assert_eq!(dialog.show(&mut host).unwrap(), Some(42));
    assert_eq!(host.cues, 1);
}

#[test]
fn test_dialog_is_centered_on_owner() {
    let mut dialog = dialog_with_max(10);
    let mut host = ScriptedHost::new([key(InputEvent::Escape)]);
    dialog.show(&mut host).unwrap();

    let bounds = dialog.bounds();
    let left = bounds.x - 1;
    let right = WIDTH - (bounds.x - 1 + bounds.width);
    assert!(left.abs_diff(right) <= 1);
}

#[test]
fn test_right_to_left_mirrors_rows() {
    let strings = Strings {
        direction: TextDirection::RightToLeft,
        ..Strings::default()
    };
    let mut dialog = GoToDialog::new(strings);
    let mut host = ScriptedHost::new([key(InputEvent::Escape)]);
    dialog.show(&mut host).unwrap();

    let (ok_row, ok_col) = host.find("< OK >").unwrap();
    let (cancel_row, cancel_col) = host.find("< Cancel >").unwrap();
    assert_eq!(ok_row, cancel_row);
    assert!(cancel_col < ok_col);

    let bounds = dialog.bounds();
    let (_, label_col) = host.find("Line Number:").unwrap();
    assert!(label_col > bounds.x + bounds.width / 2);
}

#[test]
fn test_coalesced_read_confirms_without_cue() {
    let mut dialog = dialog_with_max(100);
    let mut host = ScriptedHost::new([read(b"50\r")]);

    assert_eq!(dialog.show(&mut host).unwrap(), Some(50));
    assert_eq!(host.cues, 0);
}

#[test]
fn test_coalesced_read_cues_per_letter_then_cancels() {
    let mut dialog = dialog_with_max(1000);
    let mut host = ScriptedHost::new([read(b"12a3b\x1b")]);

    assert_eq!(dialog.show(&mut host).unwrap(), None);
    assert_eq!(dialog.text(), "123");
    assert_eq!(host.cues, 2);
}
