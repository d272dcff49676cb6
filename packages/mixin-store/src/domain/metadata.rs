//! Mod metadata (`fabric.mod.json`)
//!
//! Only the fields the index needs are read: `id`, `schemaVersion` and the
//! `mixins` list. Everything else in the file is ignored.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, StoreError};

/// The only metadata schema version understood
pub const SUPPORTED_SCHEMA_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModMetadata {
    pub id: String,
    pub schema_version: Option<u64>,
    /// Config file names, side-specific entries merged in
    pub mixin_configs: BTreeSet<String>,
}

impl ModMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schema_version: Some(SUPPORTED_SCHEMA_VERSION),
            mixin_configs: BTreeSet::new(),
        }
    }

    pub fn with_config(mut self, name: impl Into<String>) -> Self {
        self.mixin_configs.insert(name.into());
        self
    }

    /// Parse metadata text
    ///
    /// An unsupported or absent `schemaVersion` is not an error: the mod is
    /// kept with an empty config set and a warning is logged.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| StoreError::schema("mod metadata", "root is not an object"))?;

        let id = root
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::schema("mod metadata", "missing string field 'id'"))?
            .to_string();

        let schema_version = root.get("schemaVersion").and_then(Value::as_u64);
        let mut metadata = Self {
            id,
            schema_version,
            mixin_configs: BTreeSet::new(),
        };

        if schema_version != Some(SUPPORTED_SCHEMA_VERSION) {
            warn!(
                mod_id = %metadata.id,
                schema_version = ?root.get("schemaVersion"),
                "Unsupported metadata schema version, ignoring mixin configs"
            );
            return Ok(metadata);
        }

        match root.get("mixins") {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                for entry in entries {
                    metadata.mixin_configs.insert(config_name(&metadata.id, entry)?);
                }
            }
            Some(_) => {
                return Err(StoreError::schema(&metadata.id, "'mixins' is not an array"));
            }
        }
        Ok(metadata)
    }

    /// Configs added and removed going from `previous` to `self`
    ///
    /// With no previous metadata every config counts as added.
    pub fn diff_from(&self, previous: Option<&ModMetadata>) -> MetadataDiff {
        let empty = BTreeSet::new();
        let old = previous.map(|m| &m.mixin_configs).unwrap_or(&empty);
        MetadataDiff {
            added: self.mixin_configs.difference(old).cloned().collect(),
            removed: old.difference(&self.mixin_configs).cloned().collect(),
        }
    }
}

// Entries are a bare file name or `{ "config": ..., "environment": ... }`
fn config_name(mod_id: &str, entry: &Value) -> Result<String> {
    match entry {
        Value::String(name) => Ok(name.clone()),
        Value::Object(fields) => fields
            .get("config")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::schema(mod_id, "mixin entry without string 'config'")),
        other => Err(StoreError::schema(
            mod_id,
            format!("mixin entry is neither string nor object: {}", other),
        )),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataDiff {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl MetadataDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
