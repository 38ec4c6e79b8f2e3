//! A modal "Go To Line" dialog for DOS-style terminal editors
//!
//! The dialog lives on a small retained widget toolkit drawn with raw ANSI
//! escape sequences: a widget tree with stack layout, a double-buffered cell
//! screen and a termios terminal.
//!
//! ```no_run
//! use goto_dialog::{GoToDialog, Strings};
//! # fn run(host: &mut impl goto_dialog::ModalHost) -> goto_dialog::Result<()> {
//! let mut dialog = GoToDialog::new(Strings::default());
//! dialog.set_max_line_number_allowed(120);
//! if let Some(line) = dialog.show(host)? {
//!     println!("jump to {line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod screen;
pub mod terminal;
pub mod ui;

pub use error::{Error, Result};
pub use i18n::{Strings, TextDirection};
pub use input::InputEvent;
pub use screen::Screen;
pub use ui::dialogs::{
    parse_line_number, run_modal, DialogContext, DialogController, DialogResult, Feedback, GoToDialog,
    InvalidLineNumber, MessageDialog, ModalHost,
};
pub use ui::edit_filter::{DigitFilter, EditFilter, Filtered};
pub use ui::layout::Rect;
