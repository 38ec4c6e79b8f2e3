//! Centralized theme/styling system for UI widgets
//!
//! The Theme provides all colors used by widgets, ensuring consistent
//! styling across dialogs and the host window.

use crate::terminal::Color;

/// Centralized theme for all widget colors
#[derive(Clone, Debug)]
pub struct Theme {
    // Dialog/window colors
    pub dialog_fg: Color,
    pub dialog_bg: Color,
    pub dialog_border_fg: Color,
    pub dialog_border_bg: Color,
    pub dialog_title_fg: Color,
    pub dialog_title_bg: Color,
    pub dialog_shadow: bool,

    // Button colors
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_focused_fg: Color,
    pub button_focused_bg: Color,
    pub button_disabled_fg: Color,
    pub button_disabled_bg: Color,

    // TextField colors
    pub text_field_fg: Color,
    pub text_field_bg: Color,
    pub text_field_focused_fg: Color,
    pub text_field_focused_bg: Color,
    pub text_field_selection_fg: Color,
    pub text_field_selection_bg: Color,
    pub text_field_cursor_fg: Color,
    pub text_field_cursor_bg: Color,

    // Label colors
    pub label_fg: Color,
    pub label_bg: Color,
    pub label_highlight_fg: Color,
    pub label_highlight_bg: Color,

    /// Mnemonic letters in labels and buttons
    pub hotkey_fg: Color,

    // Host window colors
    pub statusbar_fg: Color,
    pub statusbar_bg: Color,
    pub editor_fg: Color,
    pub editor_bg: Color,
    pub editor_border_fg: Color,
    pub editor_current_line_fg: Color,
    pub editor_current_line_bg: Color,
    pub editor_line_number_fg: Color,
}

impl Theme {
    /// Classic DOS editor blue theme
    pub fn classic_blue() -> Self {
        Self {
            dialog_fg: Color::Black,
            dialog_bg: Color::LightGray,
            dialog_border_fg: Color::Black,
            dialog_border_bg: Color::LightGray,
            dialog_title_fg: Color::Black,
            dialog_title_bg: Color::LightGray,
            dialog_shadow: true,

            button_fg: Color::Black,
            button_bg: Color::LightGray,
            button_focused_fg: Color::White,
            button_focused_bg: Color::Black,
            button_disabled_fg: Color::DarkGray,
            button_disabled_bg: Color::LightGray,

            text_field_fg: Color::Black,
            text_field_bg: Color::White,
            text_field_focused_fg: Color::Black,
            text_field_focused_bg: Color::White,
            text_field_selection_fg: Color::White,
            text_field_selection_bg: Color::Blue,
            text_field_cursor_fg: Color::Black,
            text_field_cursor_bg: Color::LightGray,

            label_fg: Color::Black,
            label_bg: Color::LightGray,
            label_highlight_fg: Color::LightRed,
            label_highlight_bg: Color::LightGray,

            hotkey_fg: Color::White,

            statusbar_fg: Color::White,
            statusbar_bg: Color::Cyan,
            editor_fg: Color::LightGray,
            editor_bg: Color::Blue,
            editor_border_fg: Color::LightGray,
            editor_current_line_fg: Color::Blue,
            editor_current_line_bg: Color::LightGray,
            editor_line_number_fg: Color::LightCyan,
        }
    }

    /// Classic DOS dialog theme (light gray with cyan focus)
    pub fn dos_dialog() -> Self {
        let mut theme = Self::classic_blue();

        theme.text_field_bg = Color::LightGray;
        theme.text_field_focused_bg = Color::Cyan;
        theme.text_field_selection_fg = Color::White;
        theme.text_field_selection_bg = Color::Black;
        theme.text_field_cursor_fg = Color::White;
        theme.text_field_cursor_bg = Color::Black;

        theme.label_highlight_fg = Color::White;
        theme.label_highlight_bg = Color::Black;

        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic_blue()
    }
}
