//! Shared module - Common types used by every feature
//!
//! Pure data: type references, member declarations, annotations and
//! diagnostics. Nothing here performs resolution.

pub mod models;

// Re-exports for convenience
pub use models::*;
