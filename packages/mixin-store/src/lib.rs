//! Mixin Store - per-project mixin indexes
//!
//! Reads mod metadata and mixin config files from a project and its
//! classpath, indexes which mixins apply to which target classes, and keeps
//! the index current as files change.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mixin_store::{DirectoryModSource, MixinStore, ProjectBinding};
//!
//! let store = MixinStore::new(ResolverConfig::default());
//! store
//!     .register(ProjectBinding::new("demo", Arc::new(DirectoryModSource::new(resources)), decls))
//!     .await;
//!
//! // Built on first access, shared by concurrent callers
//! let mixins = store.mixins_for("demo", &TypeRef::new("com.x.Bar")).await?;
//!
//! // Incremental updates
//! store.on_metadata_changed("demo", &new_text).await?;
//! let stale = store.on_types_changed("demo", &[TypeRef::new("com.x.FooMixin")]).await?;
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StoreError};

pub use application::{ConfigLoader, Environment, LoadedMod, MixinStore, ProjectBinding};
pub use domain::{
    IndexSnapshot, IndexState, IndexStats, MetadataDiff, MixinConfig, MixinInfo, ModMetadata,
    ModSource, ProjectIndex,
};
pub use infrastructure::{DirectoryModSource, InMemoryModSource};
