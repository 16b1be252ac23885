//! Core of the customer contacts service.
//!
//! Provides the customer data model, the mutex-guarded in-memory store,
//! service configuration, and the fixed dictionary glossary.

pub mod config;
pub mod customer;
pub mod dictionary;
pub mod error;
pub mod store;

pub use customer::{Customer, CustomerId, CustomerPatch, NewCustomer};
pub use error::StoreError;
pub use store::CustomerStore;
