//! Annotation values read from augmenting-type declarations
//!
//! The resolver only ever talks to annotations through [`AnnotationMembers`],
//! a string-keyed capability lookup where absence is `None`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TypeRef;

/// A single annotation member value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    String(String),
    Class(TypeRef),
    Int(i64),
    Bool(bool),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    fn as_string(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn as_type_ref(&self) -> Option<&TypeRef> {
        match self {
            AnnotationValue::Class(t) => Some(t),
            _ => None,
        }
    }

    /// Scalars are promoted to single-element arrays
    fn elements(&self) -> &[AnnotationValue] {
        match self {
            AnnotationValue::Array(items) => items,
            scalar => std::slice::from_ref(scalar),
        }
    }
}

/// Typed, string-keyed access to annotation members
pub trait AnnotationMembers {
    /// Name the annotation was declared with (qualified or simple)
    fn annotation_type(&self) -> &str;

    fn get_string(&self, key: &str) -> Option<String>;

    fn get_string_array(&self, key: &str) -> Option<Vec<String>>;

    fn get_type_ref(&self, key: &str) -> Option<TypeRef>;

    fn get_type_ref_array(&self, key: &str) -> Option<Vec<TypeRef>>;

    /// True if this annotation is `qualified_name`, written either qualified
    /// or by its simple name
    fn is_annotation(&self, qualified_name: &str) -> bool {
        let declared = self.annotation_type();
        declared == qualified_name
            || qualified_name
                .rsplit('.')
                .next()
                .is_some_and(|simple| simple == declared)
    }
}

/// In-memory annotation as supplied by the declaration model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub type_name: String,
    #[serde(default)]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_value(key, AnnotationValue::String(value.into()))
    }

    pub fn with_strings<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = values
            .into_iter()
            .map(|s| AnnotationValue::String(s.into()))
            .collect();
        self.with_value(key, AnnotationValue::Array(items))
    }

    pub fn with_class(self, key: impl Into<String>, value: impl Into<TypeRef>) -> Self {
        self.with_value(key, AnnotationValue::Class(value.into()))
    }
}

impl AnnotationMembers for Annotation {
    fn annotation_type(&self) -> &str {
        &self.type_name
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(AnnotationValue::as_string)
            .map(str::to_string)
    }

    fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        self.values.get(key).map(|value| {
            value
                .elements()
                .iter()
                .filter_map(AnnotationValue::as_string)
                .map(str::to_string)
                .collect()
        })
    }

    fn get_type_ref(&self, key: &str) -> Option<TypeRef> {
        self.values
            .get(key)
            .and_then(AnnotationValue::as_type_ref)
            .cloned()
    }

    fn get_type_ref_array(&self, key: &str) -> Option<Vec<TypeRef>> {
        self.values.get(key).map(|value| {
            value
                .elements()
                .iter()
                .filter_map(AnnotationValue::as_type_ref)
                .cloned()
                .collect()
        })
    }
}

/// Find an annotation by qualified name among declared annotations
pub fn find_annotation<'a>(
    annotations: &'a [Annotation],
    qualified_name: &str,
) -> Option<&'a Annotation> {
    annotations.iter().find(|a| a.is_annotation(qualified_name))
}
