//! Dialog context - what a dialog may touch while handling an event.

/// Receives the "invalid input" cue (a terminal bell, a flash, a counter).
pub trait Feedback {
    fn invalid_input(&mut self);
}

/// Context passed to dialogs for handle_event.
pub struct DialogContext<'a> {
    pub feedback: &'a mut dyn Feedback,
}

impl<'a> DialogContext<'a> {
    pub fn new(feedback: &'a mut dyn Feedback) -> Self {
        Self { feedback }
    }
}

/// Result from dialog event handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DialogResult {
    /// Dialog is still open, no action needed
    #[default]
    Open,
    /// Dialog closed, carrying the confirmed value (`None` when cancelled)
    Closed(Option<usize>),
}
