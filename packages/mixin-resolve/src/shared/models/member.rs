//! Declared types and their members, as seen by target resolution

use serde::{Deserialize, Serialize};
use std::fmt;

use super::annotation::{find_annotation, Annotation};
use super::type_sig::method_descriptor;
use super::{TypeRef, TypeSig};

pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Method,
    Constructor,
    StaticInitializer,
    Field,
}

impl MemberKind {
    pub fn is_field(&self) -> bool {
        matches!(self, MemberKind::Field)
    }
}

/// Generic type parameter with its declared bounds, first bound first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeSig>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>, bounds: Vec<TypeSig>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub offset: usize,
    pub length: usize,
}

/// A method, constructor or field of a declared type
///
/// For fields `return_type` holds the field type and `params` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCandidate {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub params: Vec<TypeSig>,
    #[serde(default = "TypeSig::void")]
    pub return_type: TypeSig,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// Filled in from the owning [`TypeDecl`] when left empty
    #[serde(default)]
    pub declaring_type: TypeRef,
    #[serde(default)]
    pub source_range: Option<SourceRange>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MemberCandidate {
    pub fn method(
        declaring_type: impl Into<TypeRef>,
        name: impl Into<String>,
        params: &[&str],
        return_type: &str,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            params: params.iter().map(|p| TypeSig::new(*p)).collect(),
            return_type: TypeSig::new(return_type),
            type_parameters: Vec::new(),
            declaring_type: declaring_type.into(),
            source_range: None,
            annotations: Vec::new(),
        }
    }

    pub fn constructor(declaring_type: impl Into<TypeRef>, params: &[&str]) -> Self {
        let mut ctor = Self::method(declaring_type, CONSTRUCTOR_NAME, params, "V");
        ctor.kind = MemberKind::Constructor;
        ctor
    }

    pub fn field(declaring_type: impl Into<TypeRef>, name: impl Into<String>, field_type: &str) -> Self {
        let mut field = Self::method(declaring_type, name, &[], field_type);
        field.kind = MemberKind::Field;
        field
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn annotation(&self, qualified_name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, qualified_name)
    }

    /// Constructors may be declared under `<init>` or the owner's simple name
    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor
            || self.name == CONSTRUCTOR_NAME
            || (!self.kind.is_field()
                && !self.declaring_type.is_empty()
                && self.name == self.declaring_type.simple_name())
    }

    pub fn is_static_initializer(&self) -> bool {
        self.kind == MemberKind::StaticInitializer || self.name == STATIC_INITIALIZER_NAME
    }

    /// `(params)ret`, or the bare field type for fields
    pub fn descriptor(&self) -> String {
        if self.kind.is_field() {
            self.return_type.to_string()
        } else {
            method_descriptor(&self.params, &self.return_type)
        }
    }

    pub fn key(&self) -> MemberKey {
        MemberKey {
            declaring_type: self.declaring_type.clone(),
            name: self.name.clone(),
            descriptor: self.descriptor(),
            kind: self.kind,
        }
    }
}

/// Identity of a member, used as a map key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey {
    pub declaring_type: TypeRef,
    pub name: String,
    pub descriptor: String,
    pub kind: MemberKind,
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_field() {
            write!(f, "{}.{}:{}", self.declaring_type, self.name, self.descriptor)
        } else {
            write!(f, "{}.{}{}", self.declaring_type, self.name, self.descriptor)
        }
    }
}

/// A declared type with members in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: TypeRef,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub methods: Vec<MemberCandidate>,
    #[serde(default)]
    pub fields: Vec<MemberCandidate>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TypeDecl {
    pub fn new(name: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_parameters: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MemberCandidate) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: MemberCandidate) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn annotation(&self, qualified_name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, qualified_name)
    }

    pub fn field(&self, name: &str) -> Option<&MemberCandidate> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fill in missing declaring types and mark fields as fields
    pub fn adopt_members(&mut self) {
        for method in &mut self.methods {
            if method.declaring_type.is_empty() {
                method.declaring_type = self.name.clone();
            }
        }
        for field in &mut self.fields {
            if field.declaring_type.is_empty() {
                field.declaring_type = self.name.clone();
            }
            field.kind = MemberKind::Field;
        }
    }
}
