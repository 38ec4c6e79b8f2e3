//! Nested modal loop
//!
//! A modal dialog blocks its owner until dismissed. Rather than spinning its
//! own terminal loop, the dialog borrows frames and events from a
//! [`ModalHost`], so the same loop runs against a real terminal or a script.

use std::io;

use crate::error::Result;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;

use super::{DialogContext, DialogController, DialogResult, Feedback};

/// Host-side seam for a nested modal loop
pub trait ModalHost: Feedback {
    /// Bounds of the owner window
    fn owner_bounds(&self) -> Rect;

    /// Paint the owner and hand out the frame the dialog draws over
    fn begin_frame(&mut self) -> &mut Screen;

    /// Present the frame
    fn end_frame(&mut self) -> io::Result<()>;

    /// Next input event, or `None` once the event source is exhausted
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Open `dialog` and pump host events into it until it closes.
///
/// An exhausted event source closes the dialog as cancelled.
pub fn run_modal<D, H>(dialog: &mut D, host: &mut H) -> Result<Option<usize>>
where
    D: DialogController + ?Sized,
    H: ModalHost,
{
    dialog.set_owner_bounds(host.owner_bounds());
    dialog.open();

    loop {
        dialog.set_owner_bounds(host.owner_bounds());
        dialog.draw(host.begin_frame());
        host.end_frame()?;

        let Some(event) = host.next_event()? else {
            tracing::debug!("modal event source exhausted, cancelling");
            dialog.close();
            return Ok(None);
        };

        let mut ctx = DialogContext::new(&mut *host);
        if let DialogResult::Closed(result) = dialog.handle_event(&event, &mut ctx) {
            return Ok(result);
        }
    }
}
