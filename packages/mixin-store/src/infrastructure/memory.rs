//! Resources held in memory

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::ModSource;
use crate::error::{Result, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryModSource {
    name: String,
    files: DashMap<String, String>,
}

impl InMemoryModSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: DashMap::new(),
        }
    }

    pub fn with_file(self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&self, path: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.files.insert(path.into(), text.into())
    }

    pub fn remove(&self, path: &str) -> Option<String> {
        self.files.remove(path).map(|(_, text)| text)
    }
}

#[async_trait]
impl ModSource for InMemoryModSource {
    async fn read_resource(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .map(|text| text.clone())
            .ok_or_else(|| StoreError::resource_not_found(self.describe(), path))
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }
}
