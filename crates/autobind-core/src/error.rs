//! Error types for autobind

use thiserror::Error;

/// Result type alias for autobind operations
pub type AutobindResult<T> = Result<T, AutobindError>;

/// Error type for every fatal condition of a generation run
#[derive(Error, Debug)]
pub enum AutobindError {
    /// The front end rejected an input file
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// The front end could not be launched or returned an unreadable tree
    #[error("front end error: {0}")]
    FrontEnd(String),

    /// A type spelling has no single-character format tag
    #[error("no format tag for type '{0}'")]
    UnknownFormatType(String),

    /// A type-mapping pattern is not a valid regular expression
    #[error("invalid type pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Reading an input or writing the output failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Unknown template name or path
    #[error("template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AutobindError {
    /// Returns the process exit code reported for this error
    pub fn error_code(&self) -> i32 {
        match self {
            AutobindError::Parse { .. } => 2,
            AutobindError::FrontEnd(_) => 3,
            AutobindError::UnknownFormatType(_) => 4,
            AutobindError::InvalidPattern { .. } => 5,
            AutobindError::Io { .. } => 6,
            AutobindError::Template(_) => 7,
            AutobindError::Config(_) => 8,
        }
    }

    /// Build an I/O error for the given path
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        AutobindError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Build a parse error for the given path
    pub fn parse(path: impl AsRef<std::path::Path>, message: impl Into<String>) -> Self {
        AutobindError::Parse {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AutobindError {
    fn from(err: serde_json::Error) -> Self {
        AutobindError::FrontEnd(format!("malformed syntax tree: {err}"))
    }
}

impl From<toml::de::Error> for AutobindError {
    fn from(err: toml::de::Error) -> Self {
        AutobindError::Config(err.to_string())
    }
}
