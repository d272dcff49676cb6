//! Resolver configuration
//!
//! Versioned YAML (`version: 1`) with defaults for every field:
//!
//! ```yaml
//! version: 1
//! metadata_file: fabric.mod.json
//! project_resources: src/main/resources
//! annotations:
//!   mixin: org.spongepowered.asm.mixin.Mixin
//!   injectors:
//!     - org.spongepowered.asm.mixin.injection.Inject
//! ```

pub mod error;
pub mod io;
pub mod resolver_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, SCHEMA_VERSION};
pub use resolver_config::{AnnotationNames, ResolverConfig};
