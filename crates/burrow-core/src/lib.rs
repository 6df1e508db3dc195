//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the link identifier types and the repository
//! contract shared by the storage backends and the HTTP gateway.

pub mod error;
pub mod link;
pub mod repository;

pub use error::{CoreError, StorageError};
pub use link::{short_url, LinkId, ShortLink};
pub use repository::{ReadRepository, Repository};
