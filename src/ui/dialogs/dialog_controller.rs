//! Dialog controller trait.
//!
//! A host event loop drives any dialog through this trait without knowing
//! its concrete type. [`run_modal`](super::run_modal) uses it to run a
//! dialog as a nested modal loop.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::Rect;

use super::{DialogContext, DialogResult};

/// Controller trait that all dialogs implement.
pub trait DialogController {
    /// Open the dialog, resetting per-session state
    fn open(&mut self);

    /// Check if the dialog is currently open
    fn is_open(&self) -> bool;

    /// Close the dialog without producing a value
    fn close(&mut self);

    /// Rectangle of the owner window the dialog centers on
    fn set_owner_bounds(&mut self, owner: Rect);

    fn draw(&mut self, screen: &mut Screen);

    /// Handle an input event. `Closed` is returned once per open.
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut DialogContext) -> DialogResult;
}
