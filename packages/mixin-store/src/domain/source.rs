//! Mod resource access
//!
//! # Implementors
//!
//! - `DirectoryModSource`: an unpacked resource root on disk
//! - `InMemoryModSource`: files held in memory (tests, editors with unsaved buffers)

use std::fmt;

use async_trait::async_trait;

use crate::error::{ErrorKind, Result};

#[async_trait]
pub trait ModSource: Send + Sync + fmt::Debug {
    /// Read a resource by path relative to the mod root
    ///
    /// A missing resource is `ErrorKind::ResourceNotFound`.
    async fn read_resource(&self, path: &str) -> Result<String>;

    /// Human-readable location, used in logs and error messages
    fn describe(&self) -> String;

    /// Read a resource, mapping absence to `None`
    async fn read_optional(&self, path: &str) -> Result<Option<String>> {
        match self.read_resource(path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind == ErrorKind::ResourceNotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
