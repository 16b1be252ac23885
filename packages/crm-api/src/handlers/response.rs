//! Response builders for HTTP endpoints.

use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::router::RouterError;

/// Content type of every JSON response
pub const APPLICATION_JSON: &str = "application/json";

/// Content type of plain-text responses and error bodies
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Serializes `data` and wraps it in a JSON response.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    data: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(data)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, APPLICATION_JSON, Bytes::from(json))
}

/// Builds a plain-text response.
pub fn text_response(
    status: StatusCode,
    text: &'static str,
) -> Result<Response<Bytes>, RouterError> {
    build_response(status, TEXT_PLAIN, Bytes::from_static(text.as_bytes()))
}

/// Builds a response with an explicit content type.
pub fn build_response(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}
