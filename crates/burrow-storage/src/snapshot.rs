//! The persisted snapshot document and its on-disk codec.
//!
//! A snapshot file holds exactly one JSON document:
//!
//! ```json
//! {"max": 2, "url": [{"id": 1, "url": "https://www.google.com"}, {"id": 2, "url": "https://ya.ru"}]}
//! ```
//!
//! The file is always replaced as a whole: the new document is written to a
//! sibling temporary file, synced, and renamed over the live path. A reader
//! therefore sees either the previous document or the next one.

use crate::{LinkId, Result, ShortLink, StorageError};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{trace, warn};

const TEMP_SUFFIX: &str = ".tmp";

/// Every link stored in a file-backed repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Highest id ever allocated, `0` for an empty store.
    pub max: u32,
    /// Stored links in allocation order.
    pub url: Vec<ShortLink>,
}

impl Snapshot {
    /// Decodes a snapshot document.
    ///
    /// Zero-length or whitespace-only input is the empty snapshot. Anything
    /// else must be exactly one valid document.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(bytes).map_err(|e| StorageError::Corrupted(e.to_string()))
    }

    /// Encodes the snapshot as a single newline-terminated document.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut bytes =
            serde_json::to_vec(self).map_err(|e| StorageError::Serialization(e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Looks up the URL stored under `id`.
    pub fn find(&self, id: LinkId) -> Option<&str> {
        self.url
            .iter()
            .find(|link| link.id == id)
            .map(|link| link.long_url.as_str())
    }

    /// Appends `url` under the next free id and returns that id.
    ///
    /// The next id follows both `max` and the largest stored id, so a
    /// hand-edited file with a stale `max` never causes an id to be reused.
    pub fn push(&mut self, url: impl Into<String>) -> Result<LinkId> {
        let last = self
            .url
            .iter()
            .map(|link| link.id.get())
            .fold(self.max, u32::max);
        let id = LinkId::after(last).ok_or(StorageError::IdExhausted)?;

        self.url.push(ShortLink::new(id, url));
        self.max = id.get();
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    /// Reads the snapshot stored at `path`.
    ///
    /// A missing file is the empty snapshot.
    pub async fn load(path: &Path) -> Result<Self> {
        match fs::read(path).await {
            Ok(bytes) => Self::decode(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "snapshot file does not exist yet");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Atomically replaces the snapshot stored at `path` with `self`.
    ///
    /// Once the rename succeeds the new document is live, so a failure to
    /// sync the parent directory afterwards is logged and not returned.
    pub async fn store(&self, path: &Path) -> Result<()> {
        let bytes = self.encode()?;
        let temp_path = temp_path(path)?;

        if let Err(e) = write_synced(&temp_path, &bytes).await {
            discard(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, path).await {
            discard(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = sync_parent(path).await {
            warn!(path = %path.display(), error = %e, "failed to sync snapshot directory");
        }
        trace!(path = %path.display(), max = self.max, "snapshot replaced");
        Ok(())
    }
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        StorageError::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("snapshot path has no file name: {}", path.display()),
        ))
    })?;

    let mut temp_name = file_name.to_os_string();
    temp_name.push(TEMP_SUFFIX);
    Ok(path.with_file_name(temp_name))
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    // Data must be on disk before the rename publishes it.
    file.sync_all().await
}

async fn discard(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %temp_path.display(), error = %e, "failed to remove temporary snapshot");
        }
    }
}

#[cfg(unix)]
async fn sync_parent(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(parent).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_parent(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
