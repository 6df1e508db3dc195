use crate::error::Result;
use crate::link::LinkId;
use async_trait::async_trait;

/// A read-only view of a repository.
///
/// This trait provides only the lookup operation from [`Repository`].
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the long URL stored under `id`.
    ///
    /// Returns `Err(StorageError::NotFound)` if no link has that id.
    async fn read_url(&self, id: LinkId) -> Result<String>;
}

/// Allocates identifiers and stores links.
///
/// Implementations must hand out strictly increasing ids starting at
/// [`LinkId::FIRST`], never reuse an id, and keep every returned id
/// resolvable through [`ReadRepository::read_url`].
#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores `url` under the next free id and returns that id.
    ///
    /// Returns `Err(StorageError::EmptyUrl)` if `url` is empty. URL syntax
    /// is expected to be validated by the caller.
    async fn write_url(&self, url: &str) -> Result<LinkId>;
}
