//! Per-project mixin index
//!
//! Two multimaps over the same `MixinInfo` records:
//! - `by_target`: target class → mixins applied to it
//! - `by_config`: config file → mixins it contributed
//!
//! Buckets are sets, so loading a config twice never duplicates an entry.
//! A record contributed by several configs is reference counted and leaves
//! `by_target` only when its last contributing config is removed.
//!
//! Reads go straight to the DashMaps. Writes take `write_gate` so that a
//! replace or removal is never interleaved with another one.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info};

use mixin_resolve::TypeRef;

/// One mixin applied to one target class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MixinInfo {
    pub target: TypeRef,
    pub augmenting: TypeRef,
}

impl MixinInfo {
    pub fn new(target: impl Into<TypeRef>, augmenting: impl Into<TypeRef>) -> Self {
        Self {
            target: target.into(),
            augmenting: augmenting.into(),
        }
    }
}

/// Load progress of a project's index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    Unloaded,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub configs: usize,
    pub targets: usize,
    pub entries: usize,
    pub augmenting_types: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub load_time_ms: Option<i64>,
}

/// Serializable copy of both multimaps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexSnapshot {
    pub by_target: BTreeMap<TypeRef, Vec<TypeRef>>,
    pub by_config: BTreeMap<String, Vec<MixinInfo>>,
}

#[derive(Debug, Clone, Copy)]
struct LoadRecord {
    loaded_at: DateTime<Utc>,
    load_time_ms: i64,
}

#[derive(Debug, Default)]
pub struct ProjectIndex {
    by_target: DashMap<TypeRef, BTreeSet<MixinInfo>>,
    by_config: DashMap<String, BTreeSet<MixinInfo>>,

    /// Augmenting types each config lists, with or without resolved targets
    config_types: DashMap<String, BTreeSet<TypeRef>>,

    /// Contributing-config counts
    contributions: DashMap<MixinInfo, usize>,
    listings: DashMap<TypeRef, usize>,

    write_gate: Mutex<()>,
    load: RwLock<Option<LoadRecord>>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Writes
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace everything `config` contributed with `listed` and `entries`
    ///
    /// Returns the number of distinct entries now held for the config.
    pub fn replace_config<L, E>(&self, config: &str, listed: L, entries: E) -> usize
    where
        L: IntoIterator<Item = TypeRef>,
        E: IntoIterator<Item = MixinInfo>,
    {
        let _gate = self.write_gate.lock();
        let previous = self.remove_config_locked(config);

        let listed: BTreeSet<TypeRef> = listed.into_iter().collect();
        for ty in &listed {
            *self.listings.entry(ty.clone()).or_insert(0) += 1;
        }
        self.config_types.insert(config.to_string(), listed);

        let entries: BTreeSet<MixinInfo> = entries.into_iter().collect();
        for entry in &entries {
            self.acquire(entry);
        }
        let count = entries.len();
        self.by_config.insert(config.to_string(), entries);

        debug!(config, previous = previous.len(), current = count, "Config entries replaced");
        count
    }

    /// Remove every entry `config` contributed
    ///
    /// Entries another config also contributed stay visible by target.
    pub fn remove_config(&self, config: &str) -> BTreeSet<MixinInfo> {
        let _gate = self.write_gate.lock();
        let removed = self.remove_config_locked(config);
        if !removed.is_empty() {
            info!(config, entries = removed.len(), "Config removed from index");
        }
        removed
    }

    /// Re-point `augmenting` at `targets` in every config that lists it
    ///
    /// Returns the union of old and new target classes.
    pub fn retarget(&self, augmenting: &TypeRef, targets: &[TypeRef]) -> BTreeSet<TypeRef> {
        let _gate = self.write_gate.lock();
        let targets: BTreeSet<&TypeRef> = targets.iter().collect();
        let configs: Vec<String> = self
            .config_types
            .iter()
            .filter(|entry| entry.value().contains(augmenting))
            .map(|entry| entry.key().clone())
            .collect();

        let mut stale = BTreeSet::new();
        for config in configs {
            let old: Vec<MixinInfo> = match self.by_config.get_mut(&config) {
                Some(mut bucket) => {
                    let old: Vec<MixinInfo> = bucket
                        .iter()
                        .filter(|info| &info.augmenting == augmenting)
                        .cloned()
                        .collect();
                    for info in &old {
                        bucket.remove(info);
                    }
                    for target in &targets {
                        bucket.insert(MixinInfo::new((*target).clone(), augmenting.clone()));
                    }
                    old
                }
                None => Vec::new(),
            };
            for info in &old {
                self.release(info);
                stale.insert(info.target.clone());
            }
            for target in &targets {
                self.acquire(&MixinInfo::new((*target).clone(), augmenting.clone()));
                stale.insert((*target).clone());
            }
        }
        stale
    }

    pub fn clear(&self) {
        let _gate = self.write_gate.lock();
        self.by_target.clear();
        self.by_config.clear();
        self.config_types.clear();
        self.contributions.clear();
        self.listings.clear();
        *self.load.write() = None;
    }

    /// Record completion of the initial build
    pub fn mark_loaded(&self, started_at: DateTime<Utc>) {
        let now = Utc::now();
        *self.load.write() = Some(LoadRecord {
            loaded_at: now,
            load_time_ms: (now - started_at).num_milliseconds(),
        });
    }

    fn remove_config_locked(&self, config: &str) -> BTreeSet<MixinInfo> {
        if let Some((_, listed)) = self.config_types.remove(config) {
            for ty in &listed {
                self.decrement(&self.listings, ty);
            }
        }
        let removed = self
            .by_config
            .remove(config)
            .map(|(_, entries)| entries)
            .unwrap_or_default();
        for entry in &removed {
            self.release(entry);
        }
        removed
    }

    fn acquire(&self, info: &MixinInfo) {
        let first = {
            let mut count = self.contributions.entry(info.clone()).or_insert(0);
            *count += 1;
            *count == 1
        };
        if first {
            self.by_target
                .entry(info.target.clone())
                .or_default()
                .insert(info.clone());
        }
    }

    fn release(&self, info: &MixinInfo) {
        if !self.decrement(&self.contributions, info) {
            return;
        }
        if let Some(mut bucket) = self.by_target.get_mut(&info.target) {
            bucket.remove(info);
        }
        self.by_target.remove_if(&info.target, |_, bucket| bucket.is_empty());
    }

    // true when the count reached zero and the key was dropped
    fn decrement<K>(&self, counts: &DashMap<K, usize>, key: &K) -> bool
    where
        K: std::hash::Hash + Eq,
    {
        if let Some(mut count) = counts.get_mut(key) {
            *count = count.saturating_sub(1);
        }
        counts.remove_if(key, |_, count| *count == 0).is_some()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════════════════

    pub fn mixins_for(&self, target: &TypeRef) -> Vec<MixinInfo> {
        self.by_target
            .get(target)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn config_entries(&self, config: &str) -> Vec<MixinInfo> {
        self.by_config
            .get(config)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_config(&self, config: &str) -> bool {
        self.config_types.contains_key(config)
    }

    pub fn configs(&self) -> Vec<String> {
        let mut names: Vec<String> = self.config_types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn targets(&self) -> Vec<TypeRef> {
        let mut names: Vec<TypeRef> = self.by_target.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Whether some loaded config lists `ty`
    pub fn is_augmenting(&self, ty: &TypeRef) -> bool {
        self.listings.contains_key(ty)
    }

    pub fn augmenting_types(&self) -> Vec<TypeRef> {
        let mut names: Vec<TypeRef> = self.listings.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        let load = *self.load.read();
        IndexStats {
            configs: self.config_types.len(),
            targets: self.by_target.len(),
            entries: self.contributions.len(),
            augmenting_types: self.listings.len(),
            loaded_at: load.map(|l| l.loaded_at),
            load_time_ms: load.map(|l| l.load_time_ms),
        }
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        let by_target = self
            .by_target
            .iter()
            .map(|e| {
                let mixins = e.value().iter().map(|info| info.augmenting.clone()).collect();
                (e.key().clone(), mixins)
            })
            .collect();
        let by_config = self
            .by_config
            .iter()
            .map(|e| (e.key().clone(), e.value().iter().cloned().collect()))
            .collect();
        IndexSnapshot {
            by_target,
            by_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(name: &str) -> TypeRef {
        TypeRef::new(name)
    }

    #[test]
    fn test_replace_is_idempotent() {
        let index = ProjectIndex::new();
        let entries = || {
            vec![
                MixinInfo::new("com.x.Bar", "com.x.Foo"),
                MixinInfo::new("com.x.Baz", "com.x.Foo"),
            ]
        };
        index.replace_config("a.json", [t("com.x.Foo")], entries());
        let once = index.snapshot();
        index.replace_config("a.json", [t("com.x.Foo")], entries());

        assert_eq!(index.snapshot(), once);
        assert_eq!(index.len(), 2);
        assert_eq!(index.mixins_for(&t("com.x.Bar")).len(), 1);
    }

    #[test]
    fn test_shared_entry_survives_partial_removal() {
        let index = ProjectIndex::new();
        let shared = MixinInfo::new("com.x.Bar", "com.x.Foo");
        index.replace_config("a.json", [t("com.x.Foo")], [shared.clone()]);
        index.replace_config(
            "b.json",
            [t("com.x.Foo"), t("com.x.Qux")],
            [shared.clone(), MixinInfo::new("com.x.Bar", "com.x.Qux")],
        );

        assert!(index.has_config("b.json"));
        let removed = index.remove_config("b.json");
        assert_eq!(removed.len(), 2);
        assert!(!index.has_config("b.json"));
        assert!(index.has_config("a.json"));
        assert_eq!(index.mixins_for(&t("com.x.Bar")), vec![shared.clone()]);
        assert!(index.is_augmenting(&t("com.x.Foo")));
        assert!(!index.is_augmenting(&t("com.x.Qux")));

        index.remove_config("a.json");
        assert!(index.is_empty());
        assert!(index.targets().is_empty());
        assert!(index.augmenting_types().is_empty());
    }

    #[test]
    fn test_remove_unknown_config() {
        let index = ProjectIndex::new();
        assert!(index.remove_config("missing.json").is_empty());
    }

    #[test]
    fn test_retarget_reports_old_and_new_targets() {
        let index = ProjectIndex::new();
        index.replace_config(
            "a.json",
            [t("com.x.Foo")],
            [MixinInfo::new("com.x.Bar", "com.x.Foo")],
        );

        let stale = index.retarget(&t("com.x.Foo"), &[t("com.x.Baz")]);
        assert_eq!(stale, BTreeSet::from([t("com.x.Bar"), t("com.x.Baz")]));
        assert!(index.mixins_for(&t("com.x.Bar")).is_empty());
        assert_eq!(
            index.config_entries("a.json"),
            vec![MixinInfo::new("com.x.Baz", "com.x.Foo")]
        );

        assert!(index.retarget(&t("com.x.Unlisted"), &[t("com.x.Bar")]).is_empty());
    }

    #[test]
    fn test_stats() {
        let index = ProjectIndex::new();
        assert_eq!(index.stats().loaded_at, None);
        index.replace_config(
            "a.json",
            [t("com.x.Foo"), t("com.x.Untargeted")],
            [MixinInfo::new("com.x.Bar", "com.x.Foo")],
        );
        index.mark_loaded(Utc::now());

        let stats = index.stats();
        assert_eq!(stats.configs, 1);
        assert_eq!(stats.targets, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.augmenting_types, 2);
        assert!(stats.loaded_at.is_some());
        assert!(stats.load_time_ms.unwrap() >= 0);

        index.clear();
        assert_eq!(index.stats().configs, 0);
        assert_eq!(index.stats().loaded_at, None);
    }
}
