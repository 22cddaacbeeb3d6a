//! Error types for the alphabetize crate.

use std::path::PathBuf;

use crate::parser::ParseError;

/// Result type alias for alphabetize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, parsing or configuring.
///
/// The reordering pass itself never fails; every error here comes from the
/// collaborators around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stylesheet syntax error.
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// File I/O error.
    #[error("Failed to read stylesheet '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration{}: {message}", display_path(.path))]
    Config {
        path: Option<PathBuf>,
        message: String,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error not tied to a file.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            path: None,
            message: message.into(),
        }
    }

    /// Attach the originating file to a configuration error.
    pub fn with_config_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Config { message, .. } => Self::Config {
                path: Some(path.into()),
                message,
            },
            other => other,
        }
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse {
            message: error.kind.message().to_string(),
            line: error.line,
            column: error.column,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in '{}'", path.display()),
        None => String::new(),
    }
}
