//! Resolver configuration

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SCHEMA_VERSION};

const INJECTION_PACKAGE: &str = "org.spongepowered.asm.mixin.injection.";
const DEFAULT_INJECTORS: [&str; 6] = [
    "Inject",
    "ModifyArg",
    "ModifyArgs",
    "ModifyConstant",
    "ModifyVariable",
    "Redirect",
];

/// Fully-qualified names of the annotations the indexer recognizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationNames {
    pub mixin: String,
    pub overwrite: String,
    pub accessor: String,
    pub invoker: String,
    pub injectors: Vec<String>,
}

impl Default for AnnotationNames {
    fn default() -> Self {
        Self {
            mixin: "org.spongepowered.asm.mixin.Mixin".to_string(),
            overwrite: "org.spongepowered.asm.mixin.Overwrite".to_string(),
            accessor: "org.spongepowered.asm.mixin.gen.Accessor".to_string(),
            invoker: "org.spongepowered.asm.mixin.gen.Invoker".to_string(),
            injectors: DEFAULT_INJECTORS
                .iter()
                .map(|name| format!("{}{}", INJECTION_PACKAGE, name))
                .collect(),
        }
    }
}

/// Top-level resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Metadata file name inside a mod's resource root
    pub metadata_file: String,
    /// Resource root of the project's own mod, relative to the project
    pub project_resources: String,
    pub annotations: AnnotationNames,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            metadata_file: "fabric.mod.json".to_string(),
            project_resources: "src/main/resources".to_string(),
            annotations: AnnotationNames::default(),
        }
    }
}

impl ResolverConfig {
    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;

        // Version check before the typed pass so a missing version is reported as such
        let version = value.get("version").ok_or(ConfigError::MissingVersion)?;
        let found = version
            .as_u64()
            .ok_or_else(|| ConfigError::invalid("version", "must be a positive integer"))?;
        if found != SCHEMA_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found,
                supported: vec![SCHEMA_VERSION],
            });
        }

        let export: ConfigExportV1 = serde_yaml::from_value(value)?;
        let defaults = Self::default();
        let config = Self {
            metadata_file: export.metadata_file.unwrap_or(defaults.metadata_file),
            project_resources: export.project_resources.unwrap_or(defaults.project_resources),
            annotations: export.annotations.unwrap_or(defaults.annotations),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: SCHEMA_VERSION,
            metadata_file: Some(self.metadata_file.clone()),
            project_resources: Some(self.project_resources.clone()),
            annotations: Some(self.annotations.clone()),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let names = &self.annotations;
        for (field, value) in [
            ("metadata_file", &self.metadata_file),
            ("project_resources", &self.project_resources),
            ("annotations.mixin", &names.mixin),
            ("annotations.overwrite", &names.overwrite),
            ("annotations.accessor", &names.accessor),
            ("annotations.invoker", &names.invoker),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }

        let mut seen = HashSet::new();
        for injector in &names.injectors {
            if injector.trim().is_empty() {
                return Err(ConfigError::invalid("annotations.injectors", "contains an empty name"));
            }
            if !seen.insert(injector.as_str()) {
                return Err(ConfigError::invalid(
                    "annotations.injectors",
                    format!("'{}' listed twice", injector),
                ));
            }
        }
        Ok(())
    }
}
