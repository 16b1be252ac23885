//! Matchit routing configuration.
//!
//! Every (verb, path pattern) pair the service answers is listed once in
//! [`BINDINGS`] and loaded into matchit when the router is built. Requests
//! whose path and verb match no binding fall through to the static file
//! responder.

use std::fmt;
use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Response, StatusCode};
use matchit::Router as MatchitRouter;
use thiserror::Error;

use crate::handlers;
use crm_core::config::CrmConfig;
use crm_core::CustomerStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Customer store shared by every request
    pub store: Arc<CustomerStore>,
    /// Service configuration
    pub config: Arc<CrmConfig>,
}

/// Handler selected for a matched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListCustomers,
    CreateCustomer,
    GetCustomer,
    PatchCustomer,
    DeleteCustomer,
    ListTerms,
    LookupTerm,
}

/// Static route table: verb, matchit pattern, handler.
pub const BINDINGS: [(Method, &str, Endpoint); 7] = [
    (Method::GET, "/customers", Endpoint::ListCustomers),
    (Method::POST, "/customers", Endpoint::CreateCustomer),
    (Method::GET, "/customers/{id}", Endpoint::GetCustomer),
    (Method::PATCH, "/customers/{id}", Endpoint::PatchCustomer),
    (Method::DELETE, "/customers/{id}", Endpoint::DeleteCustomer),
    (Method::GET, "/dictionary", Endpoint::ListTerms),
    (Method::GET, "/dictionary/{term}", Endpoint::LookupTerm),
];

/// All verbs registered for one path pattern.
struct RouteEntry {
    bindings: Vec<(Method, Endpoint)>,
}

impl RouteEntry {
    fn endpoint_for(&self, method: &Method) -> Option<Endpoint> {
        self.bindings
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, endpoint)| *endpoint)
    }

    fn allowed_methods(&self) -> Vec<Method> {
        self.bindings.iter().map(|(m, _)| m.clone()).collect()
    }
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteEntry>,
    state: AppState,
}

impl Router {
    /// Creates a router serving [`BINDINGS`].
    ///
    /// # Arguments
    /// * `store` - Customer store shared with every handler
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<CustomerStore>,
        config: Arc<CrmConfig>,
    ) -> Result<Self, matchit::InsertError> {
        let mut entries: Vec<(&'static str, RouteEntry)> = Vec::new();
        for (method, pattern, endpoint) in BINDINGS {
            match entries.iter_mut().find(|(p, _)| *p == pattern) {
                Some((_, entry)) => entry.bindings.push((method, endpoint)),
                None => entries.push((
                    pattern,
                    RouteEntry {
                        bindings: vec![(method, endpoint)],
                    },
                )),
            }
        }

        let mut router = MatchitRouter::new();
        for (pattern, entry) in entries {
            tracing::debug!(pattern, methods = ?entry.allowed_methods(), "registering route");
            router.insert(pattern, entry)?;
        }

        Ok(Self {
            inner: router,
            state: AppState { store, config },
        })
    }

    /// Routes a request and always produces a response.
    ///
    /// Handler errors are turned into their HTTP form here; nothing
    /// escapes a single request.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: fmt::Display,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = match self.dispatch(req, &path).await {
            Ok(response) => response,
            Err(err) => {
                if let RouterError::InternalError(msg) = &err {
                    tracing::error!(%method, path = %path, "request failed: {}", msg);
                }
                err.into()
            }
        };

        tracing::debug!(
            %method,
            path = %path,
            status = response.status().as_u16(),
            "request handled"
        );
        response
    }

    async fn dispatch<B>(
        &self,
        req: Request<B>,
        path: &str,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: fmt::Display,
    {
        let bound = self
            .inner
            .at(path)
            .ok()
            .filter(|matched| has_numeric_id(&matched.params))
            .and_then(|matched| {
                matched
                    .value
                    .endpoint_for(req.method())
                    .map(|endpoint| (endpoint, matched.params))
            });

        match bound {
            Some((endpoint, params)) => endpoint.handle(req, params, self.state.clone()).await,
            None => handlers::serve_static(req, self.state.clone()).await,
        }
    }
}

/// `{id}` segments only route when they are one or more ASCII digits.
fn has_numeric_id(params: &matchit::Params<'_, '_>) -> bool {
    params
        .get("id")
        .map_or(true, |id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

impl Endpoint {
    /// Runs the handler bound to this endpoint.
    async fn handle<B>(
        self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: fmt::Display,
    {
        match self {
            Endpoint::ListCustomers => handlers::list_customers(req, params, state).await,
            Endpoint::CreateCustomer => handlers::create_customer(req, params, state).await,
            Endpoint::GetCustomer => handlers::get_customer(req, params, state).await,
            Endpoint::PatchCustomer => handlers::patch_customer(req, params, state).await,
            Endpoint::DeleteCustomer => handlers::delete_customer(req, params, state).await,
            Endpoint::ListTerms => handlers::list_terms(req, params, state).await,
            Endpoint::LookupTerm => handlers::lookup_term(req, params, state).await,
        }
    }
}

/// Router error type.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Undecodable request; the message becomes the response body
    #[error("{0}")]
    BadRequest(String),
    /// No route, customer, term, or file for the request
    #[error("Not Found")]
    NotFound,
    /// Request body did not arrive in time
    #[error("Request Timeout")]
    Timeout,
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl RouterError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RouterError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RouterError::NotFound => StatusCode::NOT_FOUND,
            RouterError::Timeout => StatusCode::REQUEST_TIMEOUT,
            RouterError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let mut builder = Response::builder().status(status);

        let body = match &err {
            RouterError::NotFound => Bytes::new(),
            RouterError::BadRequest(msg) | RouterError::InternalError(msg) => {
                builder = builder.header(CONTENT_TYPE, handlers::TEXT_PLAIN);
                Bytes::from(msg.clone())
            }
            RouterError::Timeout => {
                builder = builder.header(CONTENT_TYPE, handlers::TEXT_PLAIN);
                Bytes::from_static(b"Request Timeout")
            }
        };

        builder.body(body).unwrap_or_else(|_| {
            let mut fallback = Response::new(Bytes::from_static(b"Internal Server Error"));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_build_router() {
        let router = Router::new(
            Arc::new(CustomerStore::seeded()),
            Arc::new(CrmConfig::default()),
        )
        .unwrap();

        let matched = router.inner.at("/customers/42").unwrap();
        assert_eq!(matched.params.get("id"), Some("42"));
        assert_eq!(
            matched.value.endpoint_for(&Method::PATCH),
            Some(Endpoint::PatchCustomer)
        );
        assert_eq!(matched.value.endpoint_for(&Method::POST), None);

        let matched = router.inner.at("/customers").unwrap();
        assert_eq!(
            matched.value.allowed_methods(),
            vec![Method::GET, Method::POST]
        );
    }

    #[test]
    fn test_numeric_id_guard() {
        let mut router = MatchitRouter::new();
        router.insert("/customers/{id}", ()).unwrap();
        router.insert("/dictionary/{term}", ()).unwrap();

        assert!(has_numeric_id(&router.at("/customers/123").unwrap().params));
        assert!(!has_numeric_id(&router.at("/customers/abc").unwrap().params));
        assert!(!has_numeric_id(&router.at("/customers/12a").unwrap().params));
        assert!(has_numeric_id(&router.at("/dictionary/Go").unwrap().params));
    }

    #[test]
    fn test_error_responses() {
        let response: Response<Bytes> = RouterError::NotFound.into();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.body().is_empty());

        let response: Response<Bytes> =
            RouterError::BadRequest("Invalid customer ID".to_string()).into();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body().as_ref(), b"Invalid customer ID");
        assert_eq!(response.headers()[CONTENT_TYPE], handlers::TEXT_PLAIN);
    }
}
