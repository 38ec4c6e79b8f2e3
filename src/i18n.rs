//! Localized strings for the go-to dialog
//!
//! A string table is a flat TOML file keyed by identifier. Keys that contain
//! a dot must be quoted, otherwise TOML reads them as nested tables:
//!
//! ```toml
//! GotoDialogTitle = "Aller à la ligne"
//! LineNumber = "Numéro de ligne :"
//! "LineNumber.Mnemonic" = "N"
//! LineNumberRange = "Entrez un numéro entre 1 et {max}."
//! "ErrorDialog.Title" = "Erreur"
//! Direction = "ltr"
//! ```
//!
//! Missing keys fall back to the built-in English table.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const MAX_PLACEHOLDER: &str = "{max}";

/// Reading direction of the dialog layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum TextDirection {
    #[default]
    #[serde(rename = "ltr")]
    LeftToRight,
    #[serde(rename = "rtl")]
    RightToLeft,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        self == TextDirection::RightToLeft
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Strings {
    #[serde(rename = "GotoDialogTitle")]
    pub goto_dialog_title: String,
    #[serde(rename = "LineNumber")]
    pub line_number: String,
    #[serde(rename = "LineNumber.Mnemonic")]
    pub line_number_mnemonic: Option<char>,
    #[serde(rename = "OK")]
    pub ok: String,
    #[serde(rename = "OK.Mnemonic")]
    pub ok_mnemonic: Option<char>,
    #[serde(rename = "Cancel")]
    pub cancel: String,
    #[serde(rename = "Cancel.Mnemonic")]
    pub cancel_mnemonic: Option<char>,
    /// Error message template; `{max}` is replaced by the largest valid line
    #[serde(rename = "LineNumberRange")]
    pub line_number_range: String,
    #[serde(rename = "ErrorDialog.Title")]
    pub error_dialog_title: String,
    #[serde(rename = "Direction")]
    pub direction: TextDirection,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            goto_dialog_title: "Go To Line".to_string(),
            line_number: "Line Number:".to_string(),
            line_number_mnemonic: Some('L'),
            ok: "OK".to_string(),
            ok_mnemonic: Some('O'),
            cancel: "Cancel".to_string(),
            cancel_mnemonic: Some('C'),
            line_number_range: "Please enter a line number between 1 and {max}.".to_string(),
            error_dialog_title: "Error".to_string(),
            direction: TextDirection::LeftToRight,
        }
    }
}

impl Strings {
    /// Parse a string table from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Load a string table from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let strings = Self::parse(&text, path)?;
        tracing::info!(path = %path.display(), "loaded string table");
        Ok(strings)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let strings: Strings = toml::from_str(text).map_err(|source| Error::StringTable {
            path: path.to_path_buf(),
            source,
        })?;
        strings.validate()?;
        Ok(strings)
    }

    fn validate(&self) -> Result<()> {
        if !self.line_number_range.contains(MAX_PLACEHOLDER) {
            return Err(Error::MissingPlaceholder { key: "LineNumberRange" });
        }
        Ok(())
    }

    /// The out-of-range message for a document with `max` lines
    pub fn line_number_range(&self, max: usize) -> String {
        self.line_number_range.replace(MAX_PLACEHOLDER, &max.to_string())
    }

    pub fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }
}
