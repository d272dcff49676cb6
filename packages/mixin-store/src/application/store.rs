//! Per-project registry of mixin indexes
//!
//! `MixinStore` is constructed and owned by the caller; there is no global
//! instance. Each registered project gets at most one in-flight index build:
//! concurrent callers of `index` await the same build through
//! `moka::future::Cache::get_with`. The cache is keyed by project id and
//! registration generation, so a re-registered project never joins a build
//! started for its previous binding.
//!
//! Change events for one project are applied one at a time (`events` lock).
//! Different projects never share locks.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use moka::future::Cache;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use mixin_resolve::{AugmentationIndexer, ResolverConfig, TargetAugmentations, TypeDecl, TypeRef};

use crate::application::environment::{ConfigLoader, Environment, LoadedMod, ProjectBinding};
use crate::domain::{IndexState, MetadataDiff, MixinInfo, ModMetadata, ProjectIndex};
use crate::error::{Result, StoreError};

/// Upper bound on cached project indexes
const MAX_PROJECTS: u64 = 256;

/// Project id plus registration generation
type IndexKey = (String, u64);

struct ProjectState {
    binding: ProjectBinding,
    generation: u64,
    environment: RwLock<Environment>,
    state: RwLock<IndexState>,
    events: Mutex<()>,
}

impl ProjectState {
    fn new(binding: ProjectBinding, generation: u64) -> Self {
        Self {
            binding,
            generation,
            environment: RwLock::new(Environment::default()),
            state: RwLock::new(IndexState::Unloaded),
            events: Mutex::new(()),
        }
    }

    fn set_state(&self, state: IndexState) {
        *self.state.write() = state;
    }

    fn key(&self) -> IndexKey {
        (self.binding.id.clone(), self.generation)
    }
}

pub struct MixinStore {
    config: ResolverConfig,
    indexer: AugmentationIndexer,
    projects: DashMap<String, Arc<ProjectState>>,
    indexes: Cache<IndexKey, Arc<ProjectIndex>>,
    generations: AtomicU64,
}

impl MixinStore {
    pub fn new(config: ResolverConfig) -> Self {
        let indexes = Cache::builder()
            .max_capacity(MAX_PROJECTS)
            .eviction_listener(|key: Arc<IndexKey>, _index: Arc<ProjectIndex>, cause| {
                debug!(project = %key.0, generation = key.1, ?cause, "Project index evicted");
            })
            .build();
        Self {
            indexer: AugmentationIndexer::new(config.annotations.clone()),
            config,
            projects: DashMap::new(),
            indexes,
            generations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Project lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    /// Register a project, replacing any earlier binding with the same id
    ///
    /// The index is built lazily on first access.
    pub async fn register(&self, binding: ProjectBinding) {
        let id = binding.id.clone();
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let state = Arc::new(ProjectState::new(binding, generation));
        if let Some(previous) = self.projects.insert(id.clone(), state) {
            self.indexes.invalidate(&previous.key()).await;
            info!(project = %id, generation, "Project re-registered, index dropped");
        } else {
            info!(project = %id, "Project registered");
        }
    }

    /// Remove a project with its environment and index
    pub async fn remove_project(&self, project: &str) -> bool {
        match self.projects.remove(project) {
            Some((_, state)) => {
                self.indexes.invalidate(&state.key()).await;
                info!(project, "Project removed");
                true
            }
            None => false,
        }
    }

    pub fn projects(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.projects.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn index_state(&self, project: &str) -> IndexState {
        self.projects
            .get(project)
            .map(|state| *state.state.read())
            .unwrap_or(IndexState::Unloaded)
    }

    pub fn environment(&self, project: &str) -> Option<Environment> {
        self.projects
            .get(project)
            .map(|state| state.environment.read().clone())
    }

    /// The project's index, building it on first access
    ///
    /// A caller whose build was superseded by a re-registration retries
    /// against the current binding.
    pub async fn index(&self, project: &str) -> Result<Arc<ProjectIndex>> {
        loop {
            let state = self.state(project)?;
            let index = self.index_of(&state).await;
            if self.is_current(&state) {
                return Ok(index);
            }
            self.indexes.invalidate(&state.key()).await;
            debug!(project, generation = state.generation, "Discarding superseded index");
        }
    }

    /// Index of one registration, shared by every caller of that generation
    async fn index_of(&self, state: &Arc<ProjectState>) -> Arc<ProjectIndex> {
        self.indexes
            .get_with(state.key(), self.build(Arc::clone(state)))
            .await
    }

    /// Index of `state`, failing if the registration was replaced meanwhile
    async fn bound_index(&self, state: &Arc<ProjectState>) -> Result<Arc<ProjectIndex>> {
        let index = self.index_of(state).await;
        if self.is_current(state) {
            Ok(index)
        } else {
            self.indexes.invalidate(&state.key()).await;
            Err(StoreError::project_not_found(&state.binding.id))
        }
    }

    fn is_current(&self, state: &Arc<ProjectState>) -> bool {
        self.projects
            .get(&state.binding.id)
            .is_some_and(|current| Arc::ptr_eq(current.value(), state))
    }

    async fn build(&self, state: Arc<ProjectState>) -> Arc<ProjectIndex> {
        let binding = &state.binding;
        state.set_state(IndexState::Loading);
        let started_at = Utc::now();
        info!(project = %binding.id, "Building mixin index");

        let environment = Environment::discover(binding, &self.config.metadata_file).await;
        let index = Arc::new(ProjectIndex::new());
        let loaded = self
            .loader(&index, binding)
            .load_environment(&environment)
            .await;
        index.mark_loaded(started_at);

        *state.environment.write() = environment;
        state.set_state(IndexState::Loaded);

        let stats = index.stats();
        info!(
            project = %binding.id,
            configs = loaded,
            entries = stats.entries,
            load_time_ms = ?stats.load_time_ms,
            "Mixin index built"
        );
        index
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    /// Mixins targeting `target`, without triggering a build
    ///
    /// `None` means no data yet; `Some(vec![])` means loaded with no entries.
    pub async fn try_mixins_for(
        &self,
        project: &str,
        target: &TypeRef,
    ) -> Option<Vec<MixinInfo>> {
        let state = self.state(project).ok()?;
        if *state.state.read() != IndexState::Loaded {
            return None;
        }
        let index = self.indexes.get(&state.key()).await?;
        Some(index.mixins_for(target))
    }

    pub async fn mixins_for(&self, project: &str, target: &TypeRef) -> Result<Vec<MixinInfo>> {
        Ok(self.index(project).await?.mixins_for(target))
    }

    /// Resolve every augmentation applied to `open_type`
    pub async fn augmentations_for(
        &self,
        project: &str,
        open_type: &TypeRef,
    ) -> Result<TargetAugmentations> {
        let state = self.state(project)?;
        let index = self.bound_index(&state).await?;
        let declarations = &state.binding.declarations;

        let target = declarations
            .find_type(open_type)
            .ok_or_else(|| StoreError::type_not_found(open_type))?;
        let mixins: Vec<Arc<TypeDecl>> = index
            .mixins_for(open_type)
            .into_iter()
            .filter_map(|info| {
                let decl = declarations.find_type(&info.augmenting);
                if decl.is_none() {
                    debug!(mixin = %info.augmenting, "Augmenting type vanished from declarations");
                }
                decl
            })
            .collect();

        Ok(self
            .indexer
            .index(&target, mixins.iter().map(|decl| decl.as_ref())))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Change events
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply new text of the project's metadata file
    ///
    /// Malformed metadata changes nothing and returns the schema error.
    pub async fn on_metadata_changed(&self, project: &str, text: &str) -> Result<MetadataDiff> {
        let state = self.state(project)?;
        let metadata = ModMetadata::parse(text)?;
        let _events = state.events.lock().await;
        let index = self.bound_index(&state).await?;

        let previous = state
            .environment
            .read()
            .project
            .as_ref()
            .map(|m| m.metadata.clone());
        let diff = metadata.diff_from(previous.as_ref());

        for config in &diff.removed {
            index.remove_config(config);
        }
        let source = Arc::clone(&state.binding.project);
        self.loader(&index, &state.binding)
            .load_all(source.as_ref(), &diff.added)
            .await;

        state.environment.write().project = Some(LoadedMod { source, metadata });
        info!(
            project,
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Project metadata applied"
        );
        Ok(diff)
    }

    /// The project's metadata file was deleted
    ///
    /// Returns the configs that were dropped.
    pub async fn on_metadata_removed(&self, project: &str) -> Result<BTreeSet<String>> {
        let state = self.state(project)?;
        let _events = state.events.lock().await;
        let index = self.bound_index(&state).await?;

        let dropped = state.environment.write().project.take();
        let configs = dropped
            .map(|m| m.metadata.mixin_configs)
            .unwrap_or_default();
        for config in &configs {
            index.remove_config(config);
        }
        info!(project, configs = configs.len(), "Project metadata removed");
        Ok(configs)
    }

    /// Declarations of `types` changed
    ///
    /// Returns the target classes whose resolved augmentations are stale.
    pub async fn on_types_changed(
        &self,
        project: &str,
        types: &[TypeRef],
    ) -> Result<BTreeSet<TypeRef>> {
        let state = self.state(project)?;
        let _events = state.events.lock().await;
        let index = self.bound_index(&state).await?;
        let loader = self.loader(&index, &state.binding);

        let mut stale = BTreeSet::new();
        for ty in types {
            if !index.is_augmenting(ty) {
                continue;
            }
            let targets = loader.targets_of(ty);
            stale.extend(index.retarget(ty, &targets));
        }
        debug!(project, changed = types.len(), stale = stale.len(), "Types changed");
        Ok(stale)
    }

    fn state(&self, project: &str) -> Result<Arc<ProjectState>> {
        self.projects
            .get(project)
            .map(|state| Arc::clone(state.value()))
            .ok_or_else(|| StoreError::project_not_found(project))
    }

    fn loader<'a>(
        &'a self,
        index: &'a ProjectIndex,
        binding: &'a ProjectBinding,
    ) -> ConfigLoader<'a> {
        ConfigLoader::new(index, binding.declarations.as_ref(), self.indexer.names())
    }
}
