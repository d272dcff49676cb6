/*
 * Mixin Resolve - Target Resolution Engine
 *
 * Feature-First Architecture:
 * - shared/      : Common models (TypeRef, TypeDecl, Annotation, Diagnostic)
 * - features/    : Vertical slices (descriptor → quantifier → target_spec →
 *                  member_resolver → augmentation), plus the declaration port
 * - config/      : Versioned YAML resolver configuration
 *
 * The engine never reads bytecode or source. It receives declared types
 * through `DeclarationModel` and returns match decisions plus diagnostics.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnnotationNames, ConfigError, ResolverConfig};
pub use errors::{ResolveError, Result};
pub use features::augmentation::{
    AugmentationEntry, AugmentationIndexer, AugmentationKind, AugmentationSummary, HandlerRef,
    TargetAugmentations,
};
pub use features::declarations::{DeclarationModel, InMemoryDeclarations};
pub use features::member_resolver::{MemberResolver, Resolution};
pub use features::quantifier::Quantifier;
pub use features::target_spec::{Descriptor, TargetSpecifier};
pub use shared::models::{
    Annotation, AnnotationMembers, AnnotationValue, Diagnostic, DiagnosticKind, MemberCandidate,
    MemberKey, MemberKind, Severity, TypeDecl, TypeParameter, TypeRef, TypeSig,
};
