//! Transparent gzip for request and response bodies.
//!
//! Requests carrying `Content-Encoding: gzip` are inflated before they reach
//! a handler; any other content coding is refused with
//! `415 Unsupported Media Type`. Responses are gzip-encoded whenever the
//! client's `Accept-Encoding` allows it and the body is not empty.

use tower_http::compression::predicate::SizeAbove;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;

/// Inflates gzip request bodies.
pub fn request_decompression() -> RequestDecompressionLayer {
    RequestDecompressionLayer::new().gzip(true)
}

/// Gzip-encodes every non-empty response body the client accepts gzip for.
///
/// Unlike the library default, short bodies are compressed too: short
/// URLs are well below the default size threshold.
pub fn response_compression() -> CompressionLayer<SizeAbove> {
    CompressionLayer::new()
        .gzip(true)
        .compress_when(SizeAbove::new(1))
}
