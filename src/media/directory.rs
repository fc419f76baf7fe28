//! Directory blob store
//!
//! Every key maps to a file below the root directory

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use super::BlobStore;
use super::Result;
use super::validate_key;

/// Suffix of files that are still being written
const PARTIAL_SUFFIX: &str = ".partial";

/// A blob store on the local file system
#[derive(Clone, Debug)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    /// Open the store, creating the root directory when needed
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(&root).await?;

        Ok(Self { root })
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;

        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

#[async_trait]
impl BlobStore for Directory {
    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // readers never see a half written blob
        let mut partial = path.clone().into_os_string();
        partial.push(PARTIAL_SUFFIX);

        fs::write(&partial, &data).await?;
        fs::rename(&partial, &path).await?;

        tracing::debug!("Stored {} bytes in {}", data.len(), path.display());

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.path(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
