//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // View Sequence Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Nothing to display: {message}")]
    EmptyState { message: String },

    // ─────────────────────────────────────────────────────────────
    // Signal Vocabulary Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unrecognized signal name '{name}'")]
    UnknownSignal { name: String },

    #[error("Unrecognized site '{name}'")]
    UnknownSite { name: String },

    #[error("Unrecognized signal prefix '{prefix}'")]
    UnknownPrefix { prefix: String },

    #[error("Unrecognized signal type '{name}', expected one of {expected}")]
    UnknownSignalType { name: String, expected: String },

    #[error("Invalid subject list: {message}")]
    InvalidSubjects { message: String },

    #[error("Signal error: {message}")]
    Signal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Table / Record Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Table error in {path}: {message}")]
    Table { path: PathBuf, message: String },

    #[error("WFDB error in {path}: {message}")]
    Wfdb { path: PathBuf, message: String },

    #[error("Path tracing error: {message}")]
    Path { message: String },

    // ─────────────────────────────────────────────────────────────
    // Dataset Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No wfdb records found.")]
    NoRecords,

    #[error("A model is required to determine the path to {prefix}.")]
    MissingModel { prefix: String },

    #[error("Dataset error: {message}")]
    Dataset { message: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn empty_state(message: impl Into<String>) -> Self {
        Self::EmptyState {
            message: message.into(),
        }
    }

    pub fn signal(message: impl Into<String>) -> Self {
        Self::Signal {
            message: message.into(),
        }
    }

    pub fn table(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Table {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn wfdb(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Wfdb {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn path(message: impl Into<String>) -> Self {
        Self::Path {
            message: message.into(),
        }
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error came from malformed user input
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::UnknownSignal { .. }
                | Error::UnknownSite { .. }
                | Error::UnknownPrefix { .. }
                | Error::UnknownSignalType { .. }
                | Error::InvalidSubjects { .. }
                | Error::MissingModel { .. }
        )
    }

    /// Check if this error should abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::NoRecords | Error::MissingModel { .. } | Error::Terminal { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
