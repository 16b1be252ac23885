//! In-memory customer store.

use std::sync::{Mutex, MutexGuard};

use crate::customer::{demo_customers, Customer, CustomerId, CustomerPatch, NewCustomer};
use crate::error::StoreError;

/// Records plus the id counter, always accessed together under one lock.
#[derive(Debug)]
struct StoreInner {
    /// Records in insertion order
    customers: Vec<Customer>,
    /// Next id to hand out; never decremented. `None` once `u64::MAX` is used.
    next_id: Option<CustomerId>,
}

impl StoreInner {
    fn position(&self, id: CustomerId) -> Result<usize, StoreError> {
        self.customers
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound { id })
    }
}

/// Authoritative owner of all customer records and the id assignment rule.
///
/// Every operation takes the single store mutex for the duration of one
/// linear scan and hands back clones, so callers never hold references
/// into the collection.
#[derive(Debug)]
pub struct CustomerStore {
    inner: Mutex<StoreInner>,
}

impl CustomerStore {
    /// Creates an empty store. The first id handed out is 1.
    pub fn new() -> Self {
        Self::with_customers(Vec::new())
    }

    /// Creates a store holding `customers` in the given order.
    ///
    /// The id counter starts one past the largest existing id.
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let next_id = customers
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .checked_add(1);
        Self {
            inner: Mutex::new(StoreInner { customers, next_id }),
        }
    }

    /// Creates a store holding the three demo contacts (ids 1 to 3).
    pub fn seeded() -> Self {
        Self::with_customers(demo_customers())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        self.inner.lock().map_err(|_| {
            tracing::warn!("customer store mutex poisoned");
            StoreError::LockPoisoned
        })
    }

    /// Returns all records in insertion order.
    pub fn list(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.lock()?.customers.clone())
    }

    /// Stores a new record under a freshly assigned id.
    ///
    /// Ids come from a counter that deletes never rewind, so an id is
    /// never issued twice.
    ///
    /// # Returns
    /// The stored record, including its id. `StoreError::IdsExhausted`
    /// once the id counter has passed `u64::MAX`.
    pub fn insert(&self, candidate: NewCustomer) -> Result<Customer, StoreError> {
        let mut inner = self.lock()?;
        let id = inner.next_id.ok_or(StoreError::IdsExhausted)?;
        inner.next_id = id.checked_add(1);
        let customer = candidate.into_customer(id);
        inner.customers.push(customer.clone());
        tracing::info!(id, total = inner.customers.len(), "customer created");
        Ok(customer)
    }

    /// Fetches the first record with the given id.
    pub fn get(&self, id: CustomerId) -> Result<Customer, StoreError> {
        let inner = self.lock()?;
        let index = inner.position(id)?;
        Ok(inner.customers[index].clone())
    }

    /// Merges `patch` into the first record with the given id.
    ///
    /// # Returns
    /// The record as it reads after the merge.
    pub fn update(&self, id: CustomerId, patch: &CustomerPatch) -> Result<Customer, StoreError> {
        let mut inner = self.lock()?;
        let index = inner.position(id)?;
        let customer = &mut inner.customers[index];
        patch.merge_into(customer);
        if let Some(email) = patch.email.as_deref().filter(|e| !e.is_empty()) {
            tracing::debug!(id, email, "customer email updated");
        }
        tracing::info!(id, "customer updated");
        Ok(customer.clone())
    }

    /// Removes the first record with the given id, keeping the order of the rest.
    ///
    /// # Returns
    /// The removed record.
    pub fn delete(&self, id: CustomerId) -> Result<Customer, StoreError> {
        let mut inner = self.lock()?;
        let index = inner.position(id)?;
        let removed = inner.customers.remove(index);
        tracing::info!(id, remaining = inner.customers.len(), "customer deleted");
        Ok(removed)
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.customers.len())
    }

    /// Returns true when no records are stored.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.customers.is_empty())
    }
}

impl Default for CustomerStore {
    fn default() -> Self {
        Self::new()
    }
}
