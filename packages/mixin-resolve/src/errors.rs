//! Error types for mixin-resolve
//!
//! Hard failures only. Per-entry problems found while resolving targets are
//! reported as [`Diagnostic`](crate::shared::models::Diagnostic)s instead.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for mixin-resolve operations
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Malformed target specifier
    #[error("Invalid target specifier '{raw}' at offset {position}: {reason}")]
    Syntax {
        raw: String,
        position: usize,
        reason: String,
    },

    /// Malformed type or method descriptor
    #[error("Invalid descriptor '{raw}': {reason}")]
    Descriptor { raw: String, reason: String },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResolveError {
    pub fn syntax(raw: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        ResolveError::Syntax {
            raw: raw.into(),
            position,
            reason: reason.into(),
        }
    }

    pub fn descriptor(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::Descriptor {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for mixin-resolve operations
pub type Result<T> = std::result::Result<T, ResolveError>;
