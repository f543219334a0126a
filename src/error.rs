use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Which of the two config documents an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Enabled,
    Disabled,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Enabled => f.write_str("enabled"),
            DocumentKind::Disabled => f.write_str("disabled"),
        }
    }
}

/// Stable classification of an [`AppError`], safe to match on from a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    NotFound,
    NothingToReorder,
    UnsupportedPlatform,
    ExecutableNotFound,
    #[serde(rename = "IOFailure")]
    IoFailure,
    ProcessControlFailure,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Server \"{name}\" not found in {document} config")]
    NotFound { name: String, document: DocumentKind },
    #[error("No {0} servers found")]
    NothingToReorder(DocumentKind),
    #[error("Restart is only supported on Windows and macOS (current: {0})")]
    UnsupportedPlatform(String),
    #[error("Claude Desktop executable not found (looked in: {})", .0.join(", "))]
    ExecutableNotFound(Vec<String>),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error: {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    ProcessControl(String),
}

impl AppError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn not_found(name: impl Into<String>, document: DocumentKind) -> Self {
        Self::NotFound {
            name: name.into(),
            document,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::NothingToReorder(_) => ErrorKind::NothingToReorder,
            AppError::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            AppError::ExecutableNotFound(_) => ErrorKind::ExecutableNotFound,
            AppError::Config(_)
            | AppError::Io { .. }
            | AppError::IoContext { .. }
            | AppError::Json { .. }
            | AppError::JsonSerialize { .. } => ErrorKind::IoFailure,
            AppError::ProcessControl(_) => ErrorKind::ProcessControlFailure,
        }
    }
}

/// Serialized form handed to a transport: `{ "kind": ..., "message": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AppError> for ErrorReport {
    fn from(err: &AppError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
