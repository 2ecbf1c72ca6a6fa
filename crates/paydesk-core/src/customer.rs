//! Customer types for paydesk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CustomerId;

/// A customer as submitted for registration.
///
/// The id is optional; registration generates one when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Caller-chosen identifier, if any.
    #[serde(default)]
    pub id: Option<CustomerId>,

    /// Display name.
    pub name: String,

    /// Phone number in international format, e.g. `+447123456789`.
    pub phone_number: String,
}

impl NewCustomer {
    /// Create a registration candidate.
    pub fn new(
        id: Option<CustomerId>,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Turn the candidate into a stored record, generating an id if none was given.
    #[must_use]
    pub fn into_customer(self) -> Customer {
        Customer {
            id: self.id.unwrap_or_else(CustomerId::generate),
            name: self.name,
            phone_number: self.phone_number,
            created_at: Utc::now(),
        }
    }
}

/// Registration request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    /// The customer to register.
    pub customer: NewCustomer,
}

impl CustomerRegistrationRequest {
    /// Wrap a candidate in a request.
    #[must_use]
    pub fn new(customer: NewCustomer) -> Self {
        Self { customer }
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    pub id: CustomerId,

    /// Display name (never empty).
    pub name: String,

    /// Phone number, unique across customers.
    pub phone_number: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
