//! Resource root on disk

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ModSource;
use crate::error::{Result, StoreError};

#[derive(Debug, Clone)]
pub struct DirectoryModSource {
    root: PathBuf,
}

impl DirectoryModSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Resource paths stay inside the root
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            None
        } else {
            Some(self.root.join(relative))
        }
    }
}

#[async_trait]
impl ModSource for DirectoryModSource {
    async fn read_resource(&self, path: &str) -> Result<String> {
        let full = self
            .resolve(path)
            .ok_or_else(|| StoreError::resource_not_found(self.describe(), path))?;
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::resource_not_found(self.describe(), path).with_source(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_read_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fabric.mod.json"), "{}").unwrap();
        let source = DirectoryModSource::new(dir.path());

        assert_eq!(source.read_resource("fabric.mod.json").await.unwrap(), "{}");
        let err = source.read_resource("a.mixins.json").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ResourceNotFound);
        assert_eq!(source.read_optional("a.mixins.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_paths_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryModSource::new(dir.path().join("resources"));
        let err = source.read_resource("../secret.json").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ResourceNotFound);
        assert!(source.read_resource("/etc/hostname").await.is_err());
    }
}
