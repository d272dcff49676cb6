//! Domain layer: file schemas, the project index and the resource port

pub mod metadata;
pub mod mixin_config;
pub mod project_index;
pub mod source;

pub use metadata::{MetadataDiff, ModMetadata, SUPPORTED_SCHEMA_VERSION};
pub use mixin_config::MixinConfig;
pub use project_index::{IndexSnapshot, IndexState, IndexStats, MixinInfo, ProjectIndex};
pub use source::ModSource;
