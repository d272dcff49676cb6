//! Error types for mixin-store

use std::fmt;
use thiserror::Error;

use mixin_resolve::ResolveError;

/// Store error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Metadata or config file has the wrong shape
    Schema,
    /// I/O errors
    Io,
    /// Text is not JSON at all
    Json,
    /// Resource missing from a mod source
    ResourceNotFound,
    /// Project was never registered (or already removed)
    ProjectNotFound,
    /// Type absent from the project's declarations
    TypeNotFound,
    /// Error raised by the resolution engine
    Resolve,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Schema => "schema",
            ErrorKind::Io => "io",
            ErrorKind::Json => "json",
            ErrorKind::ResourceNotFound => "resource_not_found",
            ErrorKind::ProjectNotFound => "project_not_found",
            ErrorKind::TypeNotFound => "type_not_found",
            ErrorKind::Resolve => "resolve",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StoreError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn schema(file: impl AsRef<str>, reason: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::Schema,
            format!("{}: {}", file.as_ref(), reason.as_ref()),
        )
    }

    pub fn resource_not_found(source: impl AsRef<str>, path: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::ResourceNotFound,
            format!("Resource not found in {}: {}", source.as_ref(), path.as_ref()),
        )
    }

    pub fn project_not_found(project: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ProjectNotFound,
            format!("Project not found: {}", project.into()),
        )
    }

    pub fn type_not_found(type_name: impl fmt::Display) -> Self {
        Self::new(ErrorKind::TypeNotFound, format!("Type not declared: {}", type_name))
    }

    /// Whether the failure is confined to a single file
    pub fn is_file_local(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Schema | ErrorKind::Json | ErrorKind::ResourceNotFound
        )
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::new(ErrorKind::Io, format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::new(ErrorKind::Json, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<ResolveError> for StoreError {
    fn from(err: ResolveError) -> Self {
        StoreError::new(ErrorKind::Resolve, err.to_string()).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
