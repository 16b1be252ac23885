//! Customer CRUD (Create, Read, Update, Delete) handlers.

use std::fmt;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

use crate::router::{AppState, RouterError};
use crm_core::{CustomerPatch, NewCustomer};

use super::request_utils::{
    decode_json, map_store_error, parse_customer_id, read_request_body_with_timeout,
    MatchitParams,
};
use super::response::{json_response, text_response};

/// Lists every customer.
///
/// # Endpoint
/// `GET /customers`
///
/// # Response
/// - **200 OK**: JSON array of customers in insertion order
/// ```json
/// [
///   {"ID": 1, "Name": "Alice Johnson", "Role": "Manager",
///    "Email": "alice.johnson@example.com", "Phone": "555-0101", "Contacted": false}
/// ]
/// ```
pub async fn list_customers<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let customers = state.store.list().map_err(map_store_error)?;
    json_response(StatusCode::OK, &customers)
}

/// Creates a customer.
///
/// # Endpoint
/// `POST /customers`
///
/// # Request Body
/// Any subset of customer fields. An `ID` is ignored.
/// ```json
/// {"Name": "Dave Lee", "Email": "dave.lee@example.com"}
/// ```
///
/// # Response
/// - **200 OK**: The stored customer, including its assigned `ID`
///
/// # Errors
/// - **400 Bad Request**: Body is not a valid customer object; the body
///   carries the decoder message
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:3000/customers \
///   -H "Content-Type: application/json" \
///   -d '{"Name": "Dave Lee", "Role": "Designer"}'
/// ```
pub async fn create_customer<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: fmt::Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let candidate: NewCustomer = decode_json(&body_bytes)?;

    let created = state.store.insert(candidate).map_err(map_store_error)?;
    json_response(StatusCode::OK, &created)
}

/// Fetches one customer.
///
/// # Endpoint
/// `GET /customers/{id}`
///
/// # Errors
/// - **400 Bad Request**: `Invalid customer ID`
/// - **404 Not Found**: No customer with that id (empty body)
pub async fn get_customer<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_customer_id(&params)?;
    let customer = state.store.get(id).map_err(map_store_error)?;
    json_response(StatusCode::OK, &customer)
}

/// Partially updates a customer.
///
/// # Endpoint
/// `PATCH /customers/{id}`
///
/// # Request Body
/// ```json
/// {"Email": "updated.email@example.com"}
/// ```
///
/// # Response
/// - **200 OK**: The customer after the merge
///
/// # Errors
/// - **400 Bad Request**: Invalid id or undecodable body (nothing is changed)
/// - **404 Not Found**: No customer with that id, even when the body is undecodable
///
/// # Notes
/// - Empty strings leave the stored value untouched
/// - `"Contacted": false` never clears the flag
pub async fn patch_customer<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: fmt::Display,
{
    let id = parse_customer_id(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let patch: CustomerPatch = match decode_json(&body_bytes) {
        Ok(patch) => patch,
        Err(err) => {
            // Missing customers answer 404 whatever the body holds
            state.store.get(id).map_err(map_store_error)?;
            return Err(err);
        }
    };

    let updated = state.store.update(id, &patch).map_err(map_store_error)?;
    json_response(StatusCode::OK, &updated)
}

/// Deletes a customer.
///
/// # Endpoint
/// `DELETE /customers/{id}`
///
/// # Response
/// - **200 OK**: text `Deleted successfully`
///
/// # Errors
/// - **400 Bad Request**: `Invalid customer ID`
/// - **404 Not Found**: No customer with that id
pub async fn delete_customer<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_customer_id(&params)?;
    state.store.delete(id).map_err(map_store_error)?;
    text_response(StatusCode::OK, "Deleted successfully")
}
