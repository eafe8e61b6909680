//! CLI error types.

use std::fmt;

use nds_events_core::{EventError, MetaBoxError, TracingError, TranslateError};

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// A date pattern could not be read.
    Format(TranslateError),
    /// Event input could not be read or parsed.
    Input(String),
    /// An event record is invalid.
    Event(EventError),
    /// The meta box could not be shown or saved.
    MetaBox(MetaBoxError),
    /// IO error.
    Io(std::io::Error),
    /// Logging could not be set up.
    Tracing(TracingError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Format(err) => write!(f, "{}", err),
            Self::Input(msg) => write!(f, "input error: {}", msg),
            Self::Event(err) => write!(f, "invalid event: {}", err),
            Self::MetaBox(err) => write!(f, "meta box error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Tracing(err) => write!(f, "logging setup failed: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::Event(err) => Some(err),
            Self::MetaBox(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Tracing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TranslateError> for CliError {
    fn from(err: TranslateError) -> Self {
        Self::Format(err)
    }
}

impl From<EventError> for CliError {
    fn from(err: EventError) -> Self {
        Self::Event(err)
    }
}

impl From<MetaBoxError> for CliError {
    fn from(err: MetaBoxError) -> Self {
        match err {
            MetaBoxError::Event(err) => err.into(),
            MetaBoxError::Format(err) => err.into(),
            other => Self::MetaBox(other),
        }
    }
}

impl From<TracingError> for CliError {
    fn from(err: TracingError) -> Self {
        Self::Tracing(err)
    }
}
