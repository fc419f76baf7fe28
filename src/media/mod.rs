//! Media storage for note attachments
//!
//! Blobs live under the `media/` namespace of a [`BlobStore`], they are handed out through
//! time-limited links signed by the [`UrlSigner`]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use url::Url;

use crate::board::BlobResolver;
use crate::board::LocalFile;

pub use directory::Directory;
pub use key::storage_key;
pub use key::validate_key;
pub use memory::MemoryBlobs;
pub use signer::FILES_PATH;
pub use signer::UrlSigner;

mod directory;
mod key;
mod memory;
mod signer;

/// Errors that can occur during media operations
#[derive(Debug, Error)]
pub enum Error {
    /// The requested blob was not found
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// The key can not be used as a storage key
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The backing directory failed
    #[error("Blob storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A link could not be signed or verified
    #[error("Signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// A link was signed for another key
    #[error("Link does not match {0}")]
    KeyMismatch(String),
}

/// Result type for all media interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Pluggable blob storage backend
///
/// Keys are `/`-separated relative paths, see [`validate_key`]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the full blob under the key, replacing what was there
    ///
    /// Only returns once all bytes are accepted
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Retrieve a blob, `None` if nothing is stored under the key
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;
}

/// Media service: a blob store plus the signer for its links
#[derive(Clone)]
pub struct Media {
    blobs: Arc<dyn BlobStore>,
    signer: UrlSigner,
}

impl Media {
    pub fn new(blobs: Arc<dyn BlobStore>, signer: UrlSigner) -> Self {
        Self { blobs, signer }
    }

    /// Fetch a blob for a signed link
    pub async fn fetch(&self, key: &str, token: &str) -> Result<Bytes> {
        self.signer.verify(key, token)?;

        self.blobs
            .get(key)
            .await?
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }
}

#[async_trait]
impl BlobResolver for Media {
    async fn resolve_url(&self, key: &str) -> Result<Url> {
        self.signer.sign(key)
    }

    async fn upload(&self, file: &LocalFile) -> Result<String> {
        let key = storage_key(&file.name, Utc::now());

        self.blobs.put(&key, file.bytes.clone()).await?;

        tracing::debug!("Uploaded {} bytes to {key}", file.bytes.len());

        Ok(key)
    }
}
