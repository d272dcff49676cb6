//! Feature modules, leaves first
//!
//! Larger features follow the hexagonal split used across the workspace:
//! - domain/         - Pure data and aggregation
//! - ports/          - Interface definitions (traits)
//! - application/    - Use cases
//! - infrastructure/ - Implementations of ports

// Signature erasure and separator-insensitive comparison
pub mod descriptor;

// Cardinality suffix and its single-pass evaluator
pub mod quantifier;

// Textual target grammar
pub mod target_spec;

// Specifier → matching members of one type
pub mod member_resolver;

// Boundary to the declared-type model
pub mod declarations;

// Handler extraction and per-target aggregation
pub mod augmentation;
