//! Memory blob store
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use super::BlobStore;
use super::Result;
use super::validate_key;

/// An in-memory blob store
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobs {
    blobs: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobs {
    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        validate_key(key)?;

        self.blobs.lock().await.insert(key.to_string(), data);

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        validate_key(key)?;

        Ok(self.blobs.lock().await.get(key).cloned())
    }
}
