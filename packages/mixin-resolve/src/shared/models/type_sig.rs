//! Type signatures in bytecode notation (`I`, `[J`, `Lfoo/Bar;`, `TT;`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Erased type of a type variable with no declared bound
pub const OBJECT_SIGNATURE: &str = "Ljava/lang/Object;";

/// A single type signature, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSig(String);

impl TypeSig {
    pub fn new(signature: impl Into<String>) -> Self {
        TypeSig(signature.into())
    }

    pub fn object() -> Self {
        TypeSig(OBJECT_SIGNATURE.to_string())
    }

    pub fn void() -> Self {
        TypeSig("V".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for TypeSig {
    fn from(value: &str) -> Self {
        TypeSig::new(value)
    }
}

impl From<String> for TypeSig {
    fn from(value: String) -> Self {
        TypeSig(value)
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `(params)ret` rendering shared by members and specifiers
pub fn method_descriptor(params: &[TypeSig], return_type: &TypeSig) -> String {
    let mut out = String::with_capacity(2 + params.iter().map(|p| p.0.len()).sum::<usize>());
    out.push('(');
    for param in params {
        out.push_str(&param.0);
    }
    out.push(')');
    out.push_str(&return_type.0);
    out
}
