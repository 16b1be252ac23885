//! Customer record and request payload types.
//!
//! The wire names (`ID`, `Name`, `Role`, ...) match the contact list's JSON
//! contract. Lowercase keys are accepted on input as aliases.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store.
pub type CustomerId = u64;

/// A single customer contact record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Customer {
    /// Store-assigned identifier, immutable after creation
    #[serde(rename = "ID", alias = "id")]
    pub id: CustomerId,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "role")]
    pub role: String,
    #[serde(alias = "email")]
    pub email: String,
    #[serde(alias = "phone")]
    pub phone: String,
    /// Whether the customer has been reached out to
    #[serde(alias = "contacted")]
    pub contacted: bool,
}

/// Payload for creating a customer.
///
/// Any subset of fields may be supplied; missing ones default to empty.
/// There is no id field: an `ID` key is skipped like any unknown key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NewCustomer {
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "role")]
    pub role: String,
    #[serde(alias = "email")]
    pub email: String,
    #[serde(alias = "phone")]
    pub phone: String,
    #[serde(alias = "contacted")]
    pub contacted: bool,
}

impl NewCustomer {
    /// Builds the record to store under `id`.
    pub fn into_customer(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            contacted: self.contacted,
        }
    }
}

/// Partial update payload. Each field is independently present or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CustomerPatch {
    #[serde(alias = "name")]
    pub name: Option<String>,
    #[serde(alias = "role")]
    pub role: Option<String>,
    #[serde(alias = "email")]
    pub email: Option<String>,
    #[serde(alias = "phone")]
    pub phone: Option<String>,
    #[serde(alias = "contacted")]
    pub contacted: Option<bool>,
}

impl CustomerPatch {
    /// Merges this patch into `customer` in place.
    ///
    /// Text fields overwrite only when present and non-empty. `contacted`
    /// only ever moves from `false` to `true`; a submitted `false` is a no-op.
    pub fn merge_into(&self, customer: &mut Customer) {
        fill(&mut customer.name, &self.name);
        fill(&mut customer.role, &self.role);
        fill(&mut customer.email, &self.email);
        fill(&mut customer.phone, &self.phone);
        if self.contacted == Some(true) {
            customer.contacted = true;
        }
    }
}

fn fill(target: &mut String, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        *target = value.to_string();
    }
}

/// The three contacts the service starts with.
pub fn demo_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: 1,
            name: "Alice Johnson".to_string(),
            role: "Manager".to_string(),
            email: "alice.johnson@example.com".to_string(),
            phone: "555-0101".to_string(),
            contacted: false,
        },
        Customer {
            id: 2,
            name: "Bob Smith".to_string(),
            role: "Developer".to_string(),
            email: "bob.smith@example.com".to_string(),
            phone: "555-0102".to_string(),
            contacted: true,
        },
        Customer {
            id: 3,
            name: "Carol Taylor".to_string(),
            role: "Analyst".to_string(),
            email: "carol.taylor@example.com".to_string(),
            phone: "555-0103".to_string(),
            contacted: false,
        },
    ]
}
