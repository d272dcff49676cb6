//! Declaration Model Port
//!
//! The resolver never discovers classes itself. Whatever owns the source or
//! bytecode model hands declared types over through this trait.

use std::sync::Arc;

use crate::shared::models::{TypeDecl, TypeRef};

/// Read access to declared types, looked up by binary name
///
/// # Implementors
/// - `InMemoryDeclarations` (infrastructure/in_memory.rs)
pub trait DeclarationModel: Send + Sync {
    fn find_type(&self, name: &TypeRef) -> Option<Arc<TypeDecl>>;

    fn contains(&self, name: &TypeRef) -> bool {
        self.find_type(name).is_some()
    }
}
