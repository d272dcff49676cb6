//! Augmentation Indexer
//!
//! Reads an augmenting type's tagged handlers, turns each into one or more
//! [`AugmentationEntry`]s and resolves them against a target type.
//!
//! - domain/      - kinds, entries, per-target aggregation
//! - application/ - entry extraction and resolution

pub mod application;
pub mod domain;

pub use application::{
    extract_entries, mixin_targets, resolve_entry, AugmentationIndexer, Extraction,
};
pub use domain::{
    AugmentationEntry, AugmentationKind, AugmentationSummary, EntryTarget, HandlerRef,
    TargetAugmentations, TargetKey,
};
