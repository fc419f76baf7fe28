use async_trait::async_trait;
use url::Url;

use crate::media::Result;

use super::LocalFile;

/// Access to attached images
#[async_trait]
pub trait BlobResolver: Send + Sync {
    /// A time-limited retrieval URL for the key
    ///
    /// Good for a single render, do not cache
    async fn resolve_url(&self, key: &str) -> Result<Url>;

    /// Upload the whole file under a fresh `media/` key and return that key
    async fn upload(&self, file: &LocalFile) -> Result<String>;
}
