//! Parsed target specifier

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::errors::{ResolveError, Result};
use crate::features::quantifier::Quantifier;
use crate::shared::models::{method_descriptor, TypeRef, TypeSig, CONSTRUCTOR_NAME};

use super::parser;

/// Parameter and return signatures of a specifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub params: Vec<TypeSig>,
    pub return_type: TypeSig,
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&method_descriptor(&self.params, &self.return_type))
    }
}

/// Structured query selecting members of a target type
///
/// Immutable once parsed. An absent `name` matches any name and an absent
/// `descriptor` any signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSpecifier {
    pub owner: Option<TypeRef>,
    pub name: Option<String>,
    pub descriptor: Option<Descriptor>,
    pub quantifier: Quantifier,
    pub raw: String,
}

impl TargetSpecifier {
    pub fn parse(raw: &str) -> Result<Self> {
        let parts = parser::parse(raw).map_err(|e| ResolveError::syntax(raw, e.position, e.reason))?;
        Ok(Self {
            owner: parts.owner.map(TypeRef::new),
            name: parts.name.map(str::to_string),
            descriptor: parts.descriptor.map(|(params, return_type)| Descriptor {
                params,
                return_type,
            }),
            quantifier: parts.quantifier,
            raw: raw.to_string(),
        })
    }

    /// Specifier for an exact member, used where a handler's own signature
    /// names the target
    pub fn exact(name: impl Into<String>, params: Vec<TypeSig>, return_type: TypeSig) -> Self {
        let name = name.into();
        let descriptor = Descriptor {
            params,
            return_type,
        };
        Self {
            raw: format!("{}{}", name, descriptor),
            owner: None,
            name: Some(name),
            descriptor: Some(descriptor),
            quantifier: Quantifier::default(),
        }
    }

    pub fn targets_constructor(&self) -> bool {
        self.name.as_deref() == Some(CONSTRUCTOR_NAME)
    }

    /// A specifier naming another owner does not apply to `target`
    pub fn applies_to(&self, target: &TypeRef) -> bool {
        self.owner.as_ref().map_or(true, |owner| owner == target)
    }
}

impl FromStr for TargetSpecifier {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        TargetSpecifier::parse(s)
    }
}

impl fmt::Display for TargetSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_notations_agree() {
        let bytecode = TargetSpecifier::parse("Lfoo/bar/Baz;func_1234_a(DDD)V").unwrap();
        let dotted = TargetSpecifier::parse("foo.bar.Baz.func_1234_a(DDD)V").unwrap();
        assert_eq!(bytecode.owner, dotted.owner);
        assert_eq!(bytecode.name, dotted.name);
        assert_eq!(bytecode.descriptor, dotted.descriptor);
        assert_eq!(bytecode.owner.unwrap().as_str(), "foo.bar.Baz");
    }

    #[test]
    fn test_display_is_raw() {
        let raw = "foo.bar.Baz.tick{2,}(I)V";
        assert_eq!(TargetSpecifier::parse(raw).unwrap().to_string(), raw);
    }

    #[test]
    fn test_exact() {
        let spec = TargetSpecifier::exact("tick", vec![TypeSig::new("I")], TypeSig::void());
        assert_eq!(spec.raw, "tick(I)V");
        assert!(spec.quantifier.is_implicit());
        assert!(!spec.targets_constructor());
    }

    #[test]
    fn test_applies_to() {
        let bar = TypeRef::new("foo.Bar");
        assert!(TargetSpecifier::parse("tick").unwrap().applies_to(&bar));
        assert!(TargetSpecifier::parse("Lfoo/Bar;tick").unwrap().applies_to(&bar));
        assert!(!TargetSpecifier::parse("foo.Baz.tick").unwrap().applies_to(&bar));
    }

    #[test]
    fn test_syntax_error_carries_raw() {
        let err = TargetSpecifier::parse("tick{x}").unwrap_err();
        match err {
            ResolveError::Syntax { raw, position, .. } => {
                assert_eq!(raw, "tick{x}");
                assert_eq!(position, 5);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
