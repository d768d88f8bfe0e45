//! persistence::errors — failures while reading or writing sweep results.
use crate::integration::errors::IntegrationError;

#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyIOError, PyValueError},
};

/// Result alias for persistence routines.
pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PersistError {
    // ---- Storage ----
    /// Reading or writing the file failed.
    Io { path: String, kind: std::io::ErrorKind, message: String },

    // ---- Format ----
    /// File content is not a JSON object of numeric arrays.
    Json { message: String, line: usize, column: usize },
    /// A required column is absent.
    MissingKey { key: String },
    /// More than one key could be the boundary column.
    UnexpectedKeys { keys: Vec<String> },
    /// A column length differs from the boundary column.
    LengthMismatch { key: String, expected: usize, found: usize },
    /// A stored estimate is not finite or has a negative error.
    InvalidEntry { key: String, index: usize, source: IntegrationError },
}

impl PersistError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        PersistError::Io {
            path: path.display().to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Json { message: err.to_string(), line: err.line(), column: err.column() }
    }
}

impl std::error::Error for PersistError {}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io { path, message, .. } => write!(f, "I/O error on {path}: {message}"),
            PersistError::Json { message, .. } => write!(f, "Malformed result file: {message}"),
            PersistError::MissingKey { key } => write!(f, "Missing column '{key}'"),
            PersistError::UnexpectedKeys { keys } => {
                write!(f, "Ambiguous boundary column, candidates: {}", keys.join(", "))
            }
            PersistError::LengthMismatch { key, expected, found } => {
                write!(f, "Column '{key}' has {found} entries, expected {expected}")
            }
            PersistError::InvalidEntry { key, index, source } => {
                write!(f, "Invalid entry {index} in column '{key}': {source}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<PersistError> for PyErr {
    fn from(err: PersistError) -> PyErr {
        match err {
            PersistError::Io { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
