use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use burrow_core::{CoreError, StorageError};
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors produced while handling a single request.
///
/// Every variant resolves to a status code and a plain-text message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("empty request body")]
    EmptyBody,
    #[error("request body is not valid UTF-8")]
    InvalidEncoding,
    #[error("this \"{0}\" is not URL")]
    InvalidUrl(String),
    #[error("invalid data JSON")]
    InvalidJson,
    #[error("URL field is required")]
    UrlRequired,
    #[error(transparent)]
    InvalidLinkId(#[from] CoreError),
    #[error("invalid request")]
    InvalidRequest,
    #[error("stored URL is not a valid redirect target: {0}")]
    InvalidLocation(String),
    #[error("failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyBody
            | AppError::InvalidEncoding
            | AppError::InvalidUrl(_)
            | AppError::InvalidJson
            | AppError::UrlRequired
            | AppError::InvalidLinkId(_)
            | AppError::InvalidRequest
            | AppError::Storage(StorageError::EmptyUrl) => StatusCode::BAD_REQUEST,
            AppError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::InvalidLocation(_) | AppError::Encoding(_) | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, message).into_response()
    }
}

/// Errors that prevent the gateway from starting or serving.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to open storage: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
