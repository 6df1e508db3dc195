use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use burrow_core::LinkId;
use tracing::debug;
use url::Url;

const TEXT_HTML: &str = "text/html";
const APPLICATION_JSON: &str = "application/json";

/// `POST /`: the body is the long URL, the response is the short URL.
pub async fn create_url_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let body = std::str::from_utf8(&body).map_err(|_| AppError::InvalidEncoding)?;
    let long_url = body.trim_end_matches(['\r', '\n']);
    if long_url.is_empty() {
        return Err(AppError::EmptyBody);
    }
    validate_url(long_url)?;

    let id = state.repository().write_url(long_url).await?;
    let short_url = state.short_url(id);

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, TEXT_HTML)],
        short_url,
    )
        .into_response())
}

/// `POST /api/shorten`: `{"url": "..."}` in, `{"result": "..."}` out.
pub async fn shorten_url_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let request: ShortenRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidJson)?;
    let long_url = request
        .url
        .filter(|url| !url.is_empty())
        .ok_or(AppError::UrlRequired)?;
    validate_url(&long_url)?;

    let id = state.repository().write_url(&long_url).await?;
    let response = ShortenResponse {
        result: state.short_url(id),
    };
    let body = serde_json::to_vec(&response)?;

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, APPLICATION_JSON)],
        body,
    )
        .into_response())
}

/// `GET /{id}`: redirects to the stored long URL.
pub async fn redirect_handler(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let id: LinkId = raw_id.parse()?;
    let long_url = state.repository().read_url(id).await?;

    let location = HeaderValue::from_str(&long_url)
        .map_err(|_| AppError::InvalidLocation(long_url.clone()))?;
    debug!(%id, location = %long_url, "redirecting");

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// Any path no route matches.
pub async fn fallback_handler() -> AppError {
    AppError::InvalidRequest
}

/// Accepts only absolute URLs (with a scheme) that can be sent back
/// verbatim in a `Location` header.
///
/// `Url::parse` strips tabs and newlines before parsing, so control
/// characters are rejected separately.
fn validate_url(candidate: &str) -> Result<()> {
    if candidate.chars().any(char::is_control) {
        return Err(AppError::InvalidUrl(candidate.to_owned()));
    }

    Url::parse(candidate)
        .map(|_| ())
        .map_err(|_| AppError::InvalidUrl(candidate.to_owned()))
}
