//! Shared models

pub mod annotation;
mod diagnostic;
mod member;
mod type_ref;
mod type_sig;

pub use annotation::{Annotation, AnnotationMembers, AnnotationValue};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use member::{
    MemberCandidate, MemberKey, MemberKind, SourceRange, TypeDecl, TypeParameter,
    CONSTRUCTOR_NAME, STATIC_INITIALIZER_NAME,
};
pub use type_ref::TypeRef;
pub use type_sig::{method_descriptor, TypeSig, OBJECT_SIGNATURE};
