//! HTTP endpoint implementations.

pub mod customer_handlers;
pub mod dictionary_handlers;
pub mod request_utils;
pub mod response;
pub mod static_files;

pub use customer_handlers::{
    create_customer, delete_customer, get_customer, list_customers, patch_customer,
};
pub use dictionary_handlers::{list_terms, lookup_term};
pub use response::TEXT_PLAIN;
pub use static_files::serve_static;
