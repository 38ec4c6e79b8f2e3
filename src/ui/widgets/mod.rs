//! Widget primitives for building dialogs
//!
//! - Label: Static text display
//! - Spacer: Flexible empty space
//! - Button: Clickable `< label >` button
//! - TextField: Single-line filtered text input

mod button;
mod label;
mod spacer;
mod text_field;

pub use button::Button;
pub use label::{Label, LabelAlign};
pub use spacer::Spacer;
pub use text_field::TextField;
