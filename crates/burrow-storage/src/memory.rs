use crate::{LinkId, ReadRepository, Repository, Result, StorageError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct State {
    links: BTreeMap<LinkId, String>,
    last_id: u32,
}

/// In-memory implementation of the Repository trait.
///
/// The map and the id counter live behind a single reader/writer lock, so
/// allocation and insertion happen as one step and lookups never see a
/// half-written entry. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored links.
    pub fn len(&self) -> usize {
        self.state.read().links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn read_url(&self, id: LinkId) -> Result<String> {
        let state = self.state.read();
        match state.links.get(&id) {
            Some(url) => {
                debug!(%id, url = %url, "retrieved link from memory");
                Ok(url.clone())
            }
            None => Err(StorageError::NotFound(id)),
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn write_url(&self, url: &str) -> Result<LinkId> {
        if url.is_empty() {
            return Err(StorageError::EmptyUrl);
        }

        let mut state = self.state.write();
        let id = LinkId::after(state.last_id).ok_or(StorageError::IdExhausted)?;
        state.last_id = id.get();
        state.links.insert(id, url.to_owned());
        drop(state);

        info!(%id, url, "stored link in memory");
        Ok(id)
    }
}
