use std::path::PathBuf;
use thiserror::Error;

/// Crate-level errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("String table error in {}: {source}", path.display())]
    StringTable {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("String `{key}` must contain the {{max}} placeholder")]
    MissingPlaceholder { key: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
