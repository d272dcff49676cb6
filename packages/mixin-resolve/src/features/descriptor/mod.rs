//! Descriptor eraser/comparator
//!
//! Decides whether two parameter or return signatures denote the same type
//! for overload disambiguation:
//! - type variables erase to their first declared bound (Object if none)
//! - type arguments are dropped
//! - `/` and `.` compare equal at every offset

pub mod erasure;
pub mod signature;

pub use erasure::{erase, parameters_match, signatures_equal};
pub use signature::{
    parse_method_descriptor, parse_type_signature, signature_kind, type_variable_name,
    SignatureKind,
};
