use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::compression::{request_decompression, response_compression};
use crate::handlers::{create_url_handler, fallback_handler, redirect_handler, shorten_url_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the gateway router.
    ///
    /// Known paths answer other methods with `405 Method Not Allowed`;
    /// unknown paths get a generic `400`.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", post(create_url_handler))
            .route("/api/shorten", post(shorten_url_handler))
            .route("/{id}", get(redirect_handler))
            .fallback(fallback_handler)
            .with_state(state)
            .layer(response_compression())
            .layer(request_decompression())
            .layer(TraceLayer::new_for_http())
    }
}
