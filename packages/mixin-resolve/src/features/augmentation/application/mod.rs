//! Augmentation use cases

mod extract;
mod indexer;

pub use extract::{extract_entries, mixin_targets, Extraction};
pub use indexer::{resolve_entry, AugmentationIndexer};
