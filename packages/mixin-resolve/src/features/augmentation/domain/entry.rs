//! Augmentation kinds and entries

use serde::Serialize;
use std::fmt;

use crate::features::target_spec::TargetSpecifier;
use crate::shared::models::{method_descriptor, MemberCandidate, TypeRef, TypeSig};

/// The four ways a handler can apply to a target member
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AugmentationKind {
    Overwrite,
    Accessor,
    Invoker,
    /// Generic injector, tagged by its annotation's simple name
    Injector(String),
}

impl AugmentationKind {
    /// Injector kind from a qualified or simple annotation name
    pub fn injector(annotation_name: &str) -> Self {
        let simple = annotation_name.rsplit('.').next().unwrap_or(annotation_name);
        AugmentationKind::Injector(simple.to_string())
    }

    /// Display label (`@Overwrite`, `@Inject`)
    pub fn label(&self) -> String {
        match self {
            AugmentationKind::Overwrite => "@Overwrite".to_string(),
            AugmentationKind::Accessor => "@Accessor".to_string(),
            AugmentationKind::Invoker => "@Invoker".to_string(),
            AugmentationKind::Injector(name) => format!("@{}", name),
        }
    }
}

impl fmt::Display for AugmentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The augmenting member that carries an augmentation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HandlerRef {
    pub augmenting_type: TypeRef,
    pub name: String,
    pub params: Vec<TypeSig>,
    pub return_type: TypeSig,
}

impl HandlerRef {
    pub fn of(augmenting_type: &TypeRef, member: &MemberCandidate) -> Self {
        Self {
            augmenting_type: augmenting_type.clone(),
            name: member.name.clone(),
            params: member.params.clone(),
            return_type: member.return_type.clone(),
        }
    }

    pub fn descriptor(&self) -> String {
        method_descriptor(&self.params, &self.return_type)
    }

    /// Zero-parameter accessors read, the rest write
    pub fn is_getter(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.augmenting_type, self.name, self.descriptor())
    }
}

/// How an entry locates its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryTarget {
    /// Resolved through the specifier grammar
    Specifier(TargetSpecifier),
    /// Looked up directly by name (accessor fields, overwritten methods)
    Name(String),
}

impl fmt::Display for EntryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryTarget::Specifier(spec) => write!(f, "{}", spec),
            EntryTarget::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentationEntry {
    pub kind: AugmentationKind,
    pub handler: HandlerRef,
    pub target: EntryTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(AugmentationKind::Overwrite.label(), "@Overwrite");
        assert_eq!(
            AugmentationKind::injector("org.spongepowered.asm.mixin.injection.ModifyArgs").label(),
            "@ModifyArgs"
        );
        assert_eq!(AugmentationKind::injector("Inject"), AugmentationKind::Injector("Inject".into()));
    }

    #[test]
    fn test_handler_display() {
        let member = MemberCandidate::method("com.x.Foo", "onTick", &["I"], "V");
        let handler = HandlerRef::of(&TypeRef::new("com.x.Foo"), &member);
        assert_eq!(handler.to_string(), "com.x.Foo.onTick(I)V");
        assert!(!handler.is_getter());
    }
}
