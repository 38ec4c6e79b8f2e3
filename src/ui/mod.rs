//! Widget toolkit for terminal dialogs

pub mod dialogs;
pub mod edit_filter;
pub mod layout;
pub mod theme;
pub mod widget;
pub mod widget_tree;
pub mod widgets;

pub use layout::Rect;
pub use theme::Theme;
