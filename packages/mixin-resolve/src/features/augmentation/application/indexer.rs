//! Resolution of augmentation entries against an open target type

use tracing::debug;

use crate::config::AnnotationNames;
use crate::features::augmentation::domain::{
    AugmentationEntry, AugmentationKind, EntryTarget, TargetAugmentations,
};
use crate::features::member_resolver::MemberResolver;
use crate::shared::models::{method_descriptor, TypeDecl};

use super::extract::{extract_entries, mixin_targets};

/// Resolves every augmenting type applied to one target type
#[derive(Debug, Clone, Default)]
pub struct AugmentationIndexer {
    names: AnnotationNames,
}

impl AugmentationIndexer {
    pub fn new(names: AnnotationNames) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &AnnotationNames {
        &self.names
    }

    /// Resolve all of `augmenting`'s entries against `target`
    ///
    /// Augmenting types whose `@Mixin` does not name `target` contribute
    /// nothing.
    pub fn index<'a, I>(&self, target: &TypeDecl, augmenting: I) -> TargetAugmentations
    where
        I: IntoIterator<Item = &'a TypeDecl>,
    {
        let mut result = TargetAugmentations::new();
        for mixin in augmenting {
            if !mixin_targets(mixin, &self.names).contains(&target.name) {
                debug!(mixin = %mixin.name, target = %target.name, "Mixin does not target type");
                continue;
            }
            let extraction = extract_entries(mixin, &self.names);
            result.diagnostics.extend(extraction.diagnostics);
            for entry in &extraction.entries {
                resolve_entry(target, entry, &mut result);
            }
        }
        result
    }
}

/// Resolve one entry, recording matches and reports into `into`
pub fn resolve_entry(target: &TypeDecl, entry: &AugmentationEntry, into: &mut TargetAugmentations) {
    let resolver = MemberResolver::new(target);
    match (&entry.kind, &entry.target) {
        (AugmentationKind::Overwrite, EntryTarget::Name(name)) => {
            match resolver.find_method_exact(name, &entry.handler.params) {
                Some(member) => {
                    into.record(member.key(), entry.kind.clone(), entry.handler.clone());
                }
                None => {
                    let handler = &entry.handler;
                    let subject = format!(
                        "{}{}",
                        name,
                        method_descriptor(&handler.params, &handler.return_type)
                    );
                    into.diagnostics.push(resolver.not_found(&subject).emit());
                }
            }
        }
        (_, EntryTarget::Name(name)) => match resolver.find_field(name) {
            Some(field) => {
                into.record(field.key(), entry.kind.clone(), entry.handler.clone());
            }
            None => into.diagnostics.push(resolver.not_found(name).emit()),
        },
        (_, EntryTarget::Specifier(spec)) => {
            let resolution = resolver.resolve_method(spec);
            for member in resolution.matches {
                into.record(member.key(), entry.kind.clone(), entry.handler.clone());
            }
            into.diagnostics.extend(resolution.diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Annotation, DiagnosticKind, MemberCandidate, TypeRef};
    use pretty_assertions::assert_eq;

    const INJECT: &str = "org.spongepowered.asm.mixin.injection.Inject";

    fn bar() -> TypeDecl {
        let mut decl = TypeDecl::new("com.x.Bar")
            .with_method(MemberCandidate::method("com.x.Bar", "tick", &["I"], "V"))
            .with_method(MemberCandidate::method("com.x.Bar", "doThing", &[], "V"))
            .with_method(MemberCandidate::method("com.x.Bar", "recompute", &["Z"], "V"))
            .with_field(MemberCandidate::field("com.x.Bar", "count", "I"));
        decl.adopt_members();
        decl
    }

    fn foo() -> TypeDecl {
        TypeDecl::new("com.x.Foo")
            .with_annotation(Annotation::new("Mixin").with_class("value", "com.x.Bar"))
            .with_method(
                MemberCandidate::method("com.x.Foo", "tick", &["I"], "V")
                    .with_annotation(Annotation::new("Overwrite")),
            )
            .with_method(
                MemberCandidate::method("com.x.Foo", "getCount", &[], "I")
                    .with_annotation(Annotation::new("Accessor")),
            )
            .with_method(
                MemberCandidate::method("com.x.Foo", "setCount", &["I"], "V")
                    .with_annotation(Annotation::new("Accessor")),
            )
            .with_method(
                MemberCandidate::method("com.x.Foo", "invokeRecompute", &["Z"], "V")
                    .with_annotation(Annotation::new("Invoker")),
            )
            .with_method(
                MemberCandidate::method("com.x.Foo", "onDoThing", &[], "V")
                    .with_annotation(Annotation::new(INJECT).with_string("method", "doThing")),
            )
            .with_method(
                MemberCandidate::method("com.x.Foo", "onMissing", &[], "V")
                    .with_annotation(Annotation::new(INJECT).with_string("method", "missing")),
            )
    }

    #[test]
    fn test_index_all_kinds() {
        let target = bar();
        let mixin = foo();
        let augs = AugmentationIndexer::default().index(&target, [&mixin]);

        let labels: Vec<(String, String)> = augs
            .summaries()
            .iter()
            .map(|s| (s.member.to_string(), s.to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("com.x.Bar.count:I".to_string(), "@Accessor: 1 get 1 set".to_string()),
                ("com.x.Bar.doThing()V".to_string(), "1 x @Inject".to_string()),
                ("com.x.Bar.recompute(Z)V".to_string(), "1 x @Invoker".to_string()),
                ("com.x.Bar.tick(I)V".to_string(), "1 x @Overwrite".to_string()),
            ]
        );
        assert_eq!(augs.diagnostics.len(), 1);
        assert_eq!(augs.diagnostics[0].kind, DiagnosticKind::TargetNotFound);
        assert_eq!(augs.diagnostics[0].subject, "missing");
    }

    #[test]
    fn test_mixin_for_other_target_is_skipped() {
        let other = TypeDecl::new("com.x.Other");
        let mixin = foo();
        let augs = AugmentationIndexer::default().index(&other, [&mixin]);
        assert!(augs.is_empty());
        assert!(augs.diagnostics.is_empty());
    }

    #[test]
    fn test_overwrite_not_found() {
        let target = TypeDecl::new("com.x.Bar");
        let mixin = TypeDecl::new("com.x.Foo")
            .with_annotation(Annotation::new("Mixin").with_strings("targets", ["com/x/Bar"]))
            .with_method(
                MemberCandidate::method("com.x.Foo", "tick", &["I"], "V")
                    .with_annotation(Annotation::new("Overwrite")),
            );
        let augs = AugmentationIndexer::default().index(&target, [&mixin]);
        assert!(augs.is_empty());
        assert_eq!(augs.diagnostics[0].subject, "tick(I)V");
        assert_eq!(augs.diagnostics[0].message, format!("not found in {}", TypeRef::new("com.x.Bar")));
    }
}
