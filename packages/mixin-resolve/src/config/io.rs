//! Configuration I/O (YAML schema)
//!
//! Defines the on-disk schema. Loading and validation live in
//! resolver_config.rs.

use serde::{Deserialize, Serialize};

use super::resolver_config::AnnotationNames;

/// Current schema version
pub const SCHEMA_VERSION: u64 = 1;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u64,

    /// Metadata file name inside a mod's resource root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_file: Option<String>,

    /// Resource root of the project's own mod
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_resources: Option<String>,

    /// Annotation name overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<AnnotationNames>,
}
