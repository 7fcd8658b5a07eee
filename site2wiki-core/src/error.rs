//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{path:?} is not inside source root {root:?}")]
    OutsideSourceRoot { path: PathBuf, root: PathBuf },

    #[error("Rename '{from}' -> '{to}' must map a basename onto a basename")]
    InvalidRename { from: String, to: String },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("No content found in {path:?} (tried '{selector}' and '{fall_back}')")]
    ContentNotFound {
        path: PathBuf,
        selector: String,
        fall_back: String,
    },

    #[error("Markdown conversion failed for {path:?}: {source}")]
    Markdown {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {source_path:?} to {destination:?}: {error}")]
    AssetCopy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// The source or destination path the failure is about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConvertError::Io { path, .. }
            | ConvertError::OutsideSourceRoot { path, .. }
            | ConvertError::ContentNotFound { path, .. }
            | ConvertError::Markdown { path, .. } => Some(path),
            ConvertError::AssetCopy { source_path, .. } => Some(source_path),
            ConvertError::Walk(err) => err.path(),
            ConvertError::InvalidSelector { .. } | ConvertError::InvalidRename { .. } => None,
        }
    }
}
