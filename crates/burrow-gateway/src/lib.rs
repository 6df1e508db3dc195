//! HTTP gateway for the Burrow URL shortener.
//!
//! Routes plain-text and JSON shorten requests plus numeric redirects to a
//! [`Repository`](burrow_core::Repository), with transparent gzip on both
//! request and response bodies.

pub mod app;
pub mod compression;
pub mod error;
pub mod handlers;
pub mod model;
pub mod server;
pub mod state;

pub use app::App;
pub use error::{AppError, ServeError};
pub use server::{Gateway, GatewaySettings, DEFAULT_DRAIN_TIMEOUT};
pub use state::AppState;
