use crate::snapshot::Snapshot;
use crate::{LinkId, ReadRepository, Repository, Result, StorageError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// File-backed implementation of the Repository trait.
///
/// The whole mapping lives in one JSON snapshot (see [`Snapshot`]). Every
/// read loads the current snapshot, so a lookup always reflects the latest
/// committed write. A write holds the lock across the whole
/// load, append and atomic replace, so concurrent writers can never compute
/// the same id from a stale `max`.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileRepository {
    /// Creates a repository backed by the snapshot at `path`.
    ///
    /// No I/O happens until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Creates a repository and checks the snapshot up front.
    ///
    /// Missing parent directories are created. An existing snapshot that
    /// does not decode fails here instead of on the first request.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let repository = Self::new(path);

        if let Some(parent) = repository.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let snapshot = Snapshot::load(&repository.path).await?;
        info!(
            path = %repository.path.display(),
            links = snapshot.len(),
            max = snapshot.max,
            "opened snapshot"
        );

        Ok(repository)
    }

    /// Loads the currently committed snapshot.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let _guard = self.lock.read().await;
        Snapshot::load(&self.path).await
    }
}

#[async_trait]
impl ReadRepository for FileRepository {
    async fn read_url(&self, id: LinkId) -> Result<String> {
        let snapshot = self.snapshot().await?;

        match snapshot.find(id) {
            Some(url) => {
                debug!(%id, url, "retrieved link from snapshot");
                Ok(url.to_owned())
            }
            None => Err(StorageError::NotFound(id)),
        }
    }
}

#[async_trait]
impl Repository for FileRepository {
    async fn write_url(&self, url: &str) -> Result<LinkId> {
        if url.is_empty() {
            return Err(StorageError::EmptyUrl);
        }

        let _guard = self.lock.write().await;

        let mut snapshot = Snapshot::load(&self.path).await?;
        let id = snapshot.push(url)?;
        snapshot.store(&self.path).await?;

        info!(%id, url, path = %self.path.display(), "stored link in snapshot");
        Ok(id)
    }
}
