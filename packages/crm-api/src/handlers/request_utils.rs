//! Request utilities for HTTP endpoints.

use std::fmt;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::Request;
use serde::de::DeserializeOwned;
use tokio::time;

use crate::router::RouterError;
use crm_core::{CustomerId, StoreError};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Reads the whole request body, giving up after `timeout_ms`.
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: fmt::Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Decodes a JSON body. The decoder's message is the 400 response body.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, RouterError> {
    serde_json::from_slice(body).map_err(|e| RouterError::BadRequest(e.to_string()))
}

/// Parses the `{id}` path parameter.
///
/// The router only forwards digit-only ids, so this fails only for
/// values that overflow the id type.
pub fn parse_customer_id(params: &MatchitParams<'_, '_>) -> Result<CustomerId, RouterError> {
    params
        .get("id")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| RouterError::BadRequest("Invalid customer ID".to_string()))
}

/// Map StoreError to the matching RouterError
pub fn map_store_error(e: StoreError) -> RouterError {
    match e {
        StoreError::NotFound { .. } => RouterError::NotFound,
        StoreError::IdsExhausted | StoreError::LockPoisoned => {
            RouterError::InternalError(format!("Store error: {}", e))
        }
    }
}
