//! Type references
//!
//! A [`TypeRef`] always holds the dotted binary name (`com.x.Bar$Inner`),
//! whatever notation it was built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical reference to a class by its dotted binary name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeRef(String);

impl TypeRef {
    /// Accepts dotted (`com.x.Bar`), internal (`com/x/Bar`) or
    /// descriptor (`Lcom/x/Bar;`) notation.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let inner = if name.len() > 2 && name.starts_with('L') && name.ends_with(';') {
            &name[1..name.len() - 1]
        } else {
            name
        };
        TypeRef(inner.replace('/', "."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Simple name, nested types included (`Bar$Inner` → `Inner`)
    pub fn simple_name(&self) -> &str {
        let outer = self.0.rsplit('.').next().unwrap_or(&self.0);
        outer.rsplit('$').next().unwrap_or(outer)
    }

    /// Package part, empty for the default package
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Slash-separated internal name (`com/x/Bar`)
    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Field descriptor form (`Lcom/x/Bar;`)
    pub fn to_descriptor(&self) -> String {
        format!("L{};", self.internal_name())
    }

    /// Qualify a local name against a package (`com.x` + `sub.Foo`)
    pub fn qualified(package: &str, local_name: &str) -> Self {
        if package.is_empty() {
            TypeRef::new(local_name)
        } else {
            TypeRef::new(format!("{}.{}", package, local_name))
        }
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        TypeRef::new(value)
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        TypeRef::new(value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notations_normalize_to_dotted() {
        let dotted = TypeRef::new("foo.bar.Baz");
        assert_eq!(TypeRef::new("foo/bar/Baz"), dotted);
        assert_eq!(TypeRef::new("Lfoo/bar/Baz;"), dotted);
        assert_eq!(dotted.as_str(), "foo.bar.Baz");
    }

    #[test]
    fn test_name_parts() {
        let nested = TypeRef::new("com/x/Bar$Inner");
        assert_eq!(nested.simple_name(), "Inner");
        assert_eq!(nested.package(), "com.x");
        assert_eq!(nested.to_descriptor(), "Lcom/x/Bar$Inner;");

        let bare = TypeRef::new("Bar");
        assert_eq!(bare.simple_name(), "Bar");
        assert_eq!(bare.package(), "");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(TypeRef::qualified("com.x", "Foo").as_str(), "com.x.Foo");
        assert_eq!(TypeRef::qualified("com.x", "sub.Foo").as_str(), "com.x.sub.Foo");
        assert_eq!(TypeRef::qualified("", "Foo").as_str(), "Foo");
    }

    #[test]
    fn test_serde_normalizes() {
        let parsed: TypeRef = serde_json::from_str("\"Lcom/x/Bar;\"").unwrap();
        assert_eq!(parsed.as_str(), "com.x.Bar");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"com.x.Bar\"");
    }
}
