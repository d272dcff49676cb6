//! Project environment: which mods are present and which configs they declare

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use mixin_resolve::features::augmentation::mixin_targets;
use mixin_resolve::{AnnotationNames, DeclarationModel, TypeRef};

use crate::domain::{MixinConfig, MixinInfo, ModMetadata, ModSource, ProjectIndex};
use crate::error::Result;

/// Everything the store needs to know about one project
#[derive(Clone)]
pub struct ProjectBinding {
    pub id: String,
    /// Resource root of the project's own mod
    pub project: Arc<dyn ModSource>,
    /// Dependency mods, in classpath order
    pub classpath: Vec<Arc<dyn ModSource>>,
    pub declarations: Arc<dyn DeclarationModel>,
}

impl ProjectBinding {
    pub fn new(
        id: impl Into<String>,
        project: Arc<dyn ModSource>,
        declarations: Arc<dyn DeclarationModel>,
    ) -> Self {
        Self {
            id: id.into(),
            project,
            classpath: Vec::new(),
            declarations,
        }
    }

    pub fn with_classpath(mut self, source: Arc<dyn ModSource>) -> Self {
        self.classpath.push(source);
        self
    }
}

impl fmt::Debug for ProjectBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectBinding")
            .field("id", &self.id)
            .field("project", &self.project.describe())
            .field(
                "classpath",
                &self.classpath.iter().map(|s| s.describe()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// A mod whose metadata file was found and parsed
#[derive(Debug, Clone)]
pub struct LoadedMod {
    pub source: Arc<dyn ModSource>,
    pub metadata: ModMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub project: Option<LoadedMod>,
    pub classpath: Vec<LoadedMod>,
}

impl Environment {
    /// Find every mod of `binding` that carries a readable metadata file
    ///
    /// Sources without one are not mods and are skipped. A metadata file
    /// that fails to parse is reported and skipped the same way.
    pub async fn discover(binding: &ProjectBinding, metadata_file: &str) -> Self {
        let project = read_metadata(&binding.project, metadata_file).await;
        let mut classpath = Vec::new();
        for source in &binding.classpath {
            if let Some(loaded) = read_metadata(source, metadata_file).await {
                classpath.push(loaded);
            }
        }
        debug!(
            project = %binding.id,
            has_project_mod = project.is_some(),
            classpath_mods = classpath.len(),
            "Environment discovered"
        );
        Self { project, classpath }
    }

    /// Project mod first, then classpath mods
    pub fn mods(&self) -> impl Iterator<Item = &LoadedMod> {
        self.project.iter().chain(self.classpath.iter())
    }

    pub fn project_configs(&self) -> BTreeSet<String> {
        self.project
            .as_ref()
            .map(|m| m.metadata.mixin_configs.clone())
            .unwrap_or_default()
    }
}

async fn read_metadata(source: &Arc<dyn ModSource>, metadata_file: &str) -> Option<LoadedMod> {
    let text = match source.read_optional(metadata_file).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(source = %source.describe(), "No metadata file, not a mod");
            return None;
        }
        Err(err) => {
            warn!(source = %source.describe(), error = %err, "Failed to read metadata");
            return None;
        }
    };
    match ModMetadata::parse(&text) {
        Ok(metadata) => Some(LoadedMod {
            source: Arc::clone(source),
            metadata,
        }),
        Err(err) => {
            warn!(source = %source.describe(), error = %err, "Skipping malformed metadata");
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════

/// Loads config files into one project index
pub struct ConfigLoader<'a> {
    index: &'a ProjectIndex,
    declarations: &'a dyn DeclarationModel,
    names: &'a AnnotationNames,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(
        index: &'a ProjectIndex,
        declarations: &'a dyn DeclarationModel,
        names: &'a AnnotationNames,
    ) -> Self {
        Self {
            index,
            declarations,
            names,
        }
    }

    /// Read, parse and index one config, replacing what it held before
    pub async fn load(&self, source: &dyn ModSource, config: &str) -> Result<usize> {
        let text = source.read_resource(config).await?;
        let parsed = MixinConfig::parse(config, &text)?;
        let listed = parsed.augmenting_types();

        let mut entries = Vec::new();
        for augmenting in &listed {
            entries.extend(self.entries_for(augmenting));
        }
        let count = self.index.replace_config(config, listed, entries);
        info!(config, source = %source.describe(), entries = count, "Config loaded");
        Ok(count)
    }

    /// Load every config `configs` names from `source`
    ///
    /// Failures are logged per file and never stop the remaining configs.
    pub async fn load_all<'c, I>(&self, source: &dyn ModSource, configs: I) -> usize
    where
        I: IntoIterator<Item = &'c String>,
    {
        let mut loaded = 0;
        for config in configs {
            match self.load(source, config).await {
                Ok(_) => loaded += 1,
                Err(err) => {
                    warn!(config = %config, source = %source.describe(), error = %err, "Skipping config")
                }
            }
        }
        loaded
    }

    pub async fn load_environment(&self, environment: &Environment) -> usize {
        let mut loaded = 0;
        for m in environment.mods() {
            loaded += self
                .load_all(m.source.as_ref(), &m.metadata.mixin_configs)
                .await;
        }
        loaded
    }

    /// Index entries of one augmenting type, from its current declaration
    pub fn entries_for(&self, augmenting: &TypeRef) -> Vec<MixinInfo> {
        self.targets_of(augmenting)
            .into_iter()
            .map(|target| MixinInfo::new(target, augmenting.clone()))
            .collect()
    }

    pub fn targets_of(&self, augmenting: &TypeRef) -> Vec<TypeRef> {
        match self.declarations.find_type(augmenting) {
            Some(decl) => {
                let targets = mixin_targets(&decl, self.names);
                if targets.is_empty() {
                    debug!(mixin = %augmenting, "Listed type has no mixin targets");
                }
                targets
            }
            None => {
                debug!(mixin = %augmenting, "Listed type is not declared");
                Vec::new()
            }
        }
    }
}
