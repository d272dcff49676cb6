//! In-memory declaration catalogue
//!
//! Lock-free reads through DashMap; writers replace whole declarations.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::features::declarations::ports::DeclarationModel;
use crate::shared::models::{TypeDecl, TypeRef};

/// Thread-safe catalogue of declared types
#[derive(Debug, Default)]
pub struct InMemoryDeclarations {
    /// Binary name → declaration
    types: DashMap<TypeRef, Arc<TypeDecl>>,
}

impl InMemoryDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a declaration, returning the previous one
    pub fn insert(&self, mut decl: TypeDecl) -> Option<Arc<TypeDecl>> {
        decl.adopt_members();
        self.types.insert(decl.name.clone(), Arc::new(decl))
    }

    pub fn remove(&self, name: &TypeRef) -> Option<Arc<TypeDecl>> {
        self.types.remove(name).map(|(_, decl)| decl)
    }

    /// Load a JSON array of type declarations, returning how many were loaded
    pub fn load_json(&self, json: &str) -> Result<usize> {
        let decls: Vec<TypeDecl> = serde_json::from_str(json)?;
        let count = decls.len();
        for decl in decls {
            self.insert(decl);
        }
        debug!(count, total = self.types.len(), "Loaded type declarations");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Sorted binary names of all declared types
    pub fn names(&self) -> Vec<TypeRef> {
        let mut names: Vec<TypeRef> = self.types.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }
}

impl DeclarationModel for InMemoryDeclarations {
    fn find_type(&self, name: &TypeRef) -> Option<Arc<TypeDecl>> {
        self.types.get(name).map(|entry| Arc::clone(entry.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{MemberCandidate, MemberKind};

    #[test]
    fn test_insert_adopts_members() {
        let decls = InMemoryDeclarations::new();
        decls.insert(
            TypeDecl::new("com.x.Bar").with_method(MemberCandidate {
                declaring_type: TypeRef::default(),
                ..MemberCandidate::method("", "tick", &["I"], "V")
            }),
        );
        let bar = decls.find_type(&TypeRef::new("com/x/Bar")).unwrap();
        assert_eq!(bar.methods[0].declaring_type.as_str(), "com.x.Bar");
    }

    #[test]
    fn test_load_json() {
        let decls = InMemoryDeclarations::new();
        let count = decls
            .load_json(
                r#"[
                    {"name": "com.x.Bar", "fields": [{"name": "count", "return_type": "I"}]},
                    {"name": "Lcom/x/Foo;"}
                ]"#,
            )
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            decls.names(),
            vec![TypeRef::new("com.x.Bar"), TypeRef::new("com.x.Foo")]
        );
        let bar = decls.find_type(&TypeRef::new("com.x.Bar")).unwrap();
        assert_eq!(bar.fields[0].kind, MemberKind::Field);
    }

    #[test]
    fn test_replace_and_remove() {
        let decls = InMemoryDeclarations::new();
        assert!(decls.insert(TypeDecl::new("com.x.Bar")).is_none());
        assert!(decls.insert(TypeDecl::new("com.x.Bar")).is_some());
        assert_eq!(decls.len(), 1);
        assert!(decls.remove(&TypeRef::new("com.x.Bar")).is_some());
        assert!(!decls.contains(&TypeRef::new("com.x.Bar")));
        assert!(decls.load_json("{").is_err());
    }
}
