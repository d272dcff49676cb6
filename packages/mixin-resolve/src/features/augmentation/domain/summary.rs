//! Per-target aggregation of resolved augmentations

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::shared::models::{Diagnostic, MemberKey};

use super::entry::{AugmentationKind, HandlerRef};

/// Multimap key: one resolved target member under one kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetKey {
    pub member: MemberKey,
    pub kind: AugmentationKind,
}

/// Resolved augmentations of one target type
#[derive(Debug, Clone, Default)]
pub struct TargetAugmentations {
    entries: BTreeMap<TargetKey, BTreeSet<HandlerRef>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TargetAugmentations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a handler; returns false if it was already recorded
    pub fn record(&mut self, member: MemberKey, kind: AugmentationKind, handler: HandlerRef) -> bool {
        self.entries
            .entry(TargetKey { member, kind })
            .or_default()
            .insert(handler)
    }

    pub fn handlers(&self, member: &MemberKey, kind: &AugmentationKind) -> Option<&BTreeSet<HandlerRef>> {
        let key = TargetKey {
            member: member.clone(),
            kind: kind.clone(),
        };
        self.entries.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetKey, &BTreeSet<HandlerRef>)> {
        self.entries.iter()
    }

    /// Number of (member, kind) keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn extend(&mut self, other: TargetAugmentations) {
        for (key, handlers) in other.entries {
            self.entries.entry(key).or_default().extend(handlers);
        }
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn summaries(&self) -> Vec<AugmentationSummary> {
        self.entries
            .iter()
            .map(|(key, handlers)| {
                let getters = handlers.iter().filter(|h| h.is_getter()).count();
                AugmentationSummary {
                    member: key.member.clone(),
                    kind: key.kind.clone(),
                    handlers: handlers.iter().cloned().collect(),
                    getters,
                    setters: handlers.len() - getters,
                }
            })
            .collect()
    }
}

/// Aggregate view of one (member, kind) bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentationSummary {
    pub member: MemberKey,
    pub kind: AugmentationKind,
    pub handlers: Vec<HandlerRef>,
    /// Only meaningful for accessors
    pub getters: usize,
    pub setters: usize,
}

impl AugmentationSummary {
    pub fn count(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Display for AugmentationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !(self.member.kind.is_field() && self.kind == AugmentationKind::Accessor) {
            return write!(f, "{} x {}", self.count(), self.kind);
        }
        write!(f, "{}:", self.kind)?;
        if self.getters > 0 {
            write!(f, " {} get", self.getters)?;
        }
        if self.setters > 0 {
            write!(f, " {} set", self.setters)?;
        }
        Ok(())
    }
}
