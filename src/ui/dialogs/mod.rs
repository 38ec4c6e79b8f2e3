//! Dialog components
//!
//! Each dialog is a self-contained struct that owns its state and handles
//! its own drawing and event handling. Hosts drive them through
//! [`DialogController`], or run them modally with [`run_modal`].

mod dialog_context;
mod dialog_controller;
mod dialog_widget;
mod goto;
mod message;
mod modal_host;

pub use dialog_context::{DialogContext, DialogResult, Feedback};
pub use dialog_controller::DialogController;
pub use dialog_widget::DialogWidget;
pub use goto::{parse_line_number, GoToDialog, InvalidLineNumber};
pub use message::MessageDialog;
pub use modal_host::{run_modal, ModalHost};
