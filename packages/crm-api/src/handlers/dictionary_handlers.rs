//! Dictionary lookup handlers.

use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::router::{AppState, RouterError};
use crm_core::dictionary;

use super::request_utils::MatchitParams;
use super::response::json_response;

/// Single term lookup result.
#[derive(Debug, Serialize)]
pub struct TermResponse<'a> {
    pub term: &'a str,
    pub definition: &'static str,
}

/// Returns the whole glossary as a JSON object keyed by term.
///
/// # Endpoint
/// `GET /dictionary`
pub async fn list_terms<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    _state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    json_response(StatusCode::OK, &dictionary::entries())
}

/// Looks up one term.
///
/// # Endpoint
/// `GET /dictionary/{term}`
///
/// # Errors
/// - **404 Not Found**: Unknown term
pub async fn lookup_term<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    _state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let raw = params.get("term").unwrap_or_default();
    let term = percent_decode_str(raw).decode_utf8_lossy();

    let definition = dictionary::lookup(&term).ok_or(RouterError::NotFound)?;
    json_response(
        StatusCode::OK,
        &TermResponse {
            term: &term,
            definition,
        },
    )
}
