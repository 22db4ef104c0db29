//! Error types for OBJ conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Unrecognized tags and unsupported face arities are not errors; they are
/// skipped by the drivers.
#[derive(Debug, Error)]
pub enum ObjError {
    /// A file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being processed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a stream failed.
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// A recognized record has fewer fields than it needs.
    #[error("line {line}: `{tag}` record needs {expected} fields, found {found}")]
    MissingField {
        line: usize,
        tag: &'static str,
        expected: usize,
        found: usize,
    },

    /// A coordinate or index token is not a number.
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },

    /// A zero-based index does not fit a 16-bit WebGL index buffer.
    #[error("index {index} does not fit a 16-bit index buffer")]
    IndexOutOfRange { index: i64 },
}

impl ObjError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for OBJ conversion.
pub type ObjResult<T> = std::result::Result<T, ObjError>;
