//! Storage backends for the Burrow URL shortener.
//!
//! Two implementations of the [`Repository`] contract are provided:
//! [`InMemoryRepository`] keeps links for the lifetime of the process and
//! [`FileRepository`] persists them to a JSON snapshot file.

pub mod file;
pub mod memory;
pub mod snapshot;

pub use burrow_core::error::Result;
pub use burrow_core::{LinkId, ReadRepository, Repository, ShortLink, StorageError};
pub use file::FileRepository;
pub use memory::InMemoryRepository;
pub use snapshot::Snapshot;
