//! Entry extraction from augmenting-type declarations

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::AnnotationNames;
use crate::errors::ResolveError;
use crate::features::augmentation::domain::{
    AugmentationEntry, AugmentationKind, EntryTarget, HandlerRef,
};
use crate::features::target_spec::TargetSpecifier;
use crate::shared::models::{
    AnnotationMembers, Diagnostic, DiagnosticKind, MemberCandidate, TypeDecl, TypeRef,
};

static ACCESSOR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:get|set|is)([\w$\-])([\w$\-]+)$").expect("valid accessor pattern"));

static INVOKER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:call|invoke)([\w$\-])([\w$\-]+)$").expect("valid invoker pattern"));

/// Entries of one augmenting type plus the specifiers that failed to parse
#[derive(Debug, Default)]
pub struct Extraction {
    pub entries: Vec<AugmentationEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Target classes named by the augmenting type's `@Mixin`
///
/// Union of `value` (class references) and `targets` (names), sorted.
pub fn mixin_targets(augmenting: &TypeDecl, names: &AnnotationNames) -> Vec<TypeRef> {
    let Some(mixin) = augmenting.annotation(&names.mixin) else {
        debug!(augmenting = %augmenting.name, "No @Mixin annotation, no targets");
        return Vec::new();
    };
    let mut targets: BTreeSet<TypeRef> = mixin
        .get_type_ref_array("value")
        .unwrap_or_default()
        .into_iter()
        .collect();
    targets.extend(
        mixin
            .get_string_array("targets")
            .unwrap_or_default()
            .iter()
            .map(TypeRef::new),
    );
    targets.into_iter().collect()
}

/// Derive every augmentation entry declared by `augmenting`'s methods
pub fn extract_entries(augmenting: &TypeDecl, names: &AnnotationNames) -> Extraction {
    let mut extraction = Extraction::default();
    for method in &augmenting.methods {
        let handler = HandlerRef::of(&augmenting.name, method);

        if method.annotation(&names.overwrite).is_some() {
            extraction.entries.push(AugmentationEntry {
                kind: AugmentationKind::Overwrite,
                handler: handler.clone(),
                target: EntryTarget::Name(method.name.clone()),
            });
        }

        if let Some(accessor) = method.annotation(&names.accessor) {
            match accessor_target(accessor, method) {
                Some(field) => extraction.entries.push(AugmentationEntry {
                    kind: AugmentationKind::Accessor,
                    handler: handler.clone(),
                    target: EntryTarget::Name(field),
                }),
                None => debug!(handler = %handler, "Accessor name does not imply a field"),
            }
        }

        if let Some(invoker) = method.annotation(&names.invoker) {
            match invoker_target(invoker, &handler) {
                Some(raw) => extraction.push_specifier(AugmentationKind::Invoker, &handler, &raw),
                None => debug!(handler = %handler, "Invoker name does not imply a method"),
            }
        }

        for injector_name in &names.injectors {
            let Some(injector) = method.annotation(injector_name) else {
                continue;
            };
            let kind = AugmentationKind::injector(injector_name);
            let specs = injector.get_string_array("method").unwrap_or_default();
            if specs.is_empty() {
                debug!(handler = %handler, kind = %kind, "Injector without method targets");
            }
            for raw in specs {
                extraction.push_specifier(kind.clone(), &handler, &raw);
            }
        }
    }
    extraction
}

impl Extraction {
    fn push_specifier(&mut self, kind: AugmentationKind, handler: &HandlerRef, raw: &str) {
        match TargetSpecifier::parse(raw) {
            Ok(spec) => self.entries.push(AugmentationEntry {
                kind,
                handler: handler.clone(),
                target: EntryTarget::Specifier(spec),
            }),
            Err(err) => {
                let message = match err {
                    ResolveError::Syntax { reason, position, .. } => {
                        format!("{} at offset {} (handler {})", reason, position, handler)
                    }
                    other => other.to_string(),
                };
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::Syntax, raw, message).emit());
            }
        }
    }
}

/// Explicit `value`, else the handler name minus `get`/`set`/`is`
fn accessor_target(accessor: &impl AnnotationMembers, method: &MemberCandidate) -> Option<String> {
    if let Some(value) = accessor.get_string("value").filter(|v| !v.is_empty()) {
        return Some(value);
    }
    derive_name(&ACCESSOR_NAME, &method.name)
}

/// Explicit `value` plus the handler descriptor, else the handler name
/// minus `call`/`invoke` plus the handler descriptor
fn invoker_target(invoker: &impl AnnotationMembers, handler: &HandlerRef) -> Option<String> {
    let name = match invoker.get_string("value").filter(|v| !v.is_empty()) {
        Some(value) if value.contains('(') => return Some(value),
        Some(value) => value,
        None => derive_name(&INVOKER_NAME, &handler.name)?,
    };
    Some(format!("{}{}", name, handler.descriptor()))
}

fn derive_name(pattern: &Regex, handler_name: &str) -> Option<String> {
    let captures = pattern.captures(handler_name)?;
    let first = captures.get(1)?.as_str().to_lowercase();
    let rest = captures.get(2)?.as_str();
    Some(format!("{}{}", first, rest))
}
