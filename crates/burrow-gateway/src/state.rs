use std::sync::Arc;

use burrow_core::{short_url, LinkId, Repository};

#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn Repository>,
    base_url: Arc<str>,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>, public_base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: Arc::from(public_base_url.into()),
        }
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    /// Builds the public short URL for `id`.
    pub fn short_url(&self, id: LinkId) -> String {
        short_url(&self.base_url, id)
    }
}
