use thiserror::Error;

/// Result type alias for document operations
pub type IniResult<T> = Result<T, IniError>;

/// Errors surfaced by the document engine.
///
/// Parsing, merging, lookups and in-memory mutations never fail; malformed lines
/// are dropped and missing sections or keys read as absent. Only persistence and
/// explicit file loads can produce an error.
#[derive(Debug, Clone, Error)]
pub enum IniError {
    /// `persist()` was called but the document was neither loaded from a path
    /// nor given a destination
    #[error("No persist target: the document was not loaded from a path and no destination was given")]
    NoPersistTarget,

    /// File I/O error
    #[error("I/O error for '{path}': {message}")]
    Io { path: String, message: String },

    /// Bytes could not be decoded in the requested encoding
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// Custom error with message
    #[error("{message}")]
    Custom { message: String },
}

impl IniError {
    /// Create the missing-destination error
    pub fn no_persist_target() -> Self {
        IniError::NoPersistTarget
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        IniError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        IniError::Encoding {
            message: message.into(),
        }
    }

    /// Create a custom error
    pub fn custom(message: impl Into<String>) -> Self {
        IniError::Custom {
            message: message.into(),
        }
    }
}

/// Path reported for I/O errors that did not come from a named file
pub(crate) const STREAM_PATH: &str = "<stream>";

impl From<std::io::Error> for IniError {
    fn from(err: std::io::Error) -> Self {
        IniError::io(STREAM_PATH, err.to_string())
    }
}
