//! Store error types.

use thiserror::Error;

use crate::customer::CustomerId;

/// Customer store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record carries the requested id
    #[error("Customer {id} not found")]
    NotFound { id: CustomerId },

    /// Every id up to `u64::MAX` has been handed out
    #[error("Customer ids exhausted")]
    IdsExhausted,

    /// Lock poisoned (a writer panicked while holding the store mutex)
    #[error("Lock poisoned")]
    LockPoisoned,
}
