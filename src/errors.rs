//! Error types for loading and replaying traces
//!
//! Load failures ([`LoadError`]) never disturb the active trace: the session
//! only replaces its trace once a response has been fully accepted. Playback
//! errors ([`PlaybackError`]) describe transitions that were refused and leave
//! the cursor untouched.

use thiserror::Error;

/// Reasons a source file was rejected before submission
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Only .{expected} files are allowed")]
    InvalidExtension { expected: &'static str },

    #[error("Please enter some code to execute.")]
    Empty,

    #[error("Code too long. Maximum {limit} characters allowed (got {len}).")]
    TooLong { len: usize, limit: usize },
}

/// Reasons a trace could not be installed
#[derive(Error, Debug)]
pub enum LoadError {
    /// The tracing service could not be reached or its reply was unreadable
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service ran the program and reported a failure
    #[error("{kind}: {message}")]
    Execution { kind: String, message: String },

    /// The call succeeded but produced zero steps
    #[error("The code executed but no steps were captured.")]
    EmptyResult,

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl LoadError {
    /// Short category label for the presentation layer
    pub fn title(&self) -> &str {
        match self {
            LoadError::Transport(_) => "Network Error",
            LoadError::Execution { kind, .. } => kind.as_str(),
            LoadError::EmptyResult => "No Execution Steps",
            LoadError::Source(SourceError::Read { .. }) => "Read Error",
            LoadError::Source(SourceError::Empty) => "No code provided",
            LoadError::Source(_) => "Upload Error",
        }
    }

    /// Human readable detail, passed through verbatim for execution failures
    pub fn message(&self) -> String {
        match self {
            LoadError::Execution { message, .. } => message.clone(),
            LoadError::Transport(detail) => {
                format!("Failed to communicate with the server: {}", detail)
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Transport(err.to_string())
    }
}

/// Transitions refused by the session controller
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("no trace loaded")]
    NoTrace,

    #[error("a trace request is still pending")]
    LoadPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failure_passes_through() {
        let err = LoadError::Execution {
            kind: "ZeroDivisionError".to_string(),
            message: "division by zero".to_string(),
        };
        assert_eq!(err.title(), "ZeroDivisionError");
        assert_eq!(err.message(), "division by zero");
    }

    #[test]
    fn test_empty_result_is_distinct_from_transport() {
        let empty = LoadError::EmptyResult;
        let transport = LoadError::Transport("connection refused".to_string());
        assert_ne!(empty.title(), transport.title());
        assert!(empty.message().contains("no steps were captured"));
    }
}
