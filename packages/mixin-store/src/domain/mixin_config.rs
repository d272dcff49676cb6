//! Augmentation config file (`*.mixins.json`)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mixin_resolve::TypeRef;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixinConfig {
    /// File name the config was read from
    pub name: String,
    pub package: String,
    pub mixins: Vec<String>,
    pub client: Vec<String>,
    pub server: Vec<String>,
}

#[derive(Deserialize)]
struct RawConfig {
    package: String,
    #[serde(default)]
    mixins: Option<Vec<String>>,
    #[serde(default)]
    client: Option<Vec<String>>,
    #[serde(default)]
    server: Option<Vec<String>>,
}

impl MixinConfig {
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(StoreError::schema(&name, "root is not an object"));
        }
        let raw: RawConfig = serde_json::from_value(value)
            .map_err(|e| StoreError::schema(&name, e.to_string()).with_source(e))?;

        Ok(Self {
            name,
            package: raw.package,
            mixins: raw.mixins.unwrap_or_default(),
            client: raw.client.unwrap_or_default(),
            server: raw.server.unwrap_or_default(),
        })
    }

    /// Qualified augmenting types across all three lists
    ///
    /// Side-specific lists are merged with the common one. Duplicates are
    /// kept once, in first-seen order.
    pub fn augmenting_types(&self) -> Vec<TypeRef> {
        let mut out: Vec<TypeRef> = Vec::new();
        for local in self.mixins.iter().chain(&self.client).chain(&self.server) {
            let qualified = TypeRef::qualified(&self.package, local);
            if !out.contains(&qualified) {
                out.push(qualified);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lists_are_merged_and_qualified() {
        let config = MixinConfig::parse(
            "a.mixins.json",
            r#"{
                "required": true,
                "package": "com.x.mixin",
                "compatibilityLevel": "JAVA_17",
                "mixins": ["FooMixin", "render.BarMixin"],
                "client": ["ClientMixin", "FooMixin"],
                "server": null
            }"#,
        )
        .unwrap();
        let names: Vec<String> = config
            .augmenting_types()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            names,
            vec![
                "com.x.mixin.FooMixin",
                "com.x.mixin.render.BarMixin",
                "com.x.mixin.ClientMixin",
            ]
        );
    }

    #[test]
    fn test_schema_errors() {
        let err = MixinConfig::parse("a.json", r#"["FooMixin"]"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Schema);

        let err = MixinConfig::parse("a.json", r#"{"mixins": ["FooMixin"]}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Schema);
        assert!(err.message.starts_with("a.json:"));

        let err = MixinConfig::parse("a.json", r#"{"package": "p", "mixins": [1]}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Schema);
    }
}
