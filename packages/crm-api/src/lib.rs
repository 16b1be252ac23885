//! REST API server for the customer contacts service.
//!
//! Provides the customer CRUD endpoints, the dictionary lookup,
//! the static file fallback, and request routing.

pub mod handlers;
pub mod router;
pub mod server;
