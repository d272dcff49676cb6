//! Augmentation domain types

mod entry;
mod summary;

pub use entry::{AugmentationEntry, AugmentationKind, EntryTarget, HandlerRef};
pub use summary::{AugmentationSummary, TargetAugmentations, TargetKey};
