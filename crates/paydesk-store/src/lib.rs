//! Storage layer for paydesk.
//!
//! Persistence is exposed as two capability traits, [`CustomerStore`] and
//! [`PaymentStore`], so the workflows can run against any backend.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local maps, always available.
//! - [`RocksStore`]: `RocksDB` with column families (feature `rocksdb-backend`):
//!   - `customers`: customer records, keyed by `customer_id`
//!   - `customers_by_phone`: unique index, phone number to `customer_id`
//!   - `payments`: payment records, keyed by `payment_id` (ULID)
//!   - `payments_by_customer`: index, `customer_id || payment_id` to empty value
//!
//! # Example
//!
//! ```no_run
//! use paydesk_store::{CustomerStore, MemoryStore};
//! use paydesk_core::NewCustomer;
//!
//! let store = MemoryStore::new();
//! let customer = NewCustomer::new(None, "James", "+447123456789").into_customer();
//! store.insert_customer(&customer).unwrap();
//!
//! let found = store.find_customer_by_phone("+447123456789").unwrap();
//! assert_eq!(found, Some(customer));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use paydesk_core::{Customer, CustomerId, Payment, PaymentId};

/// Customer persistence: lookup by id, lookup by phone number, insert.
pub trait CustomerStore: Send + Sync {
    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_customer(&self, customer_id: &CustomerId) -> Result<Option<Customer>>;

    /// Find the customer registered with `phone_number`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_customer_by_phone(&self, phone_number: &str) -> Result<Option<Customer>>;

    /// Insert a new customer.
    ///
    /// The check for an existing id or phone number and the write happen
    /// as one atomic step.
    ///
    /// # Errors
    ///
    /// - `StoreError::Constraint` if the name or phone number is empty.
    /// - `StoreError::Conflict` if the id or phone number is already stored.
    fn insert_customer(&self, customer: &Customer) -> Result<()>;

    /// Delete a customer and its phone index entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the customer doesn't exist.
    fn delete_customer(&self, customer_id: &CustomerId) -> Result<()>;
}

/// Payment persistence: lookup by id, insert, list by customer.
pub trait PaymentStore: Send + Sync {
    /// Get a payment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_payment(&self, payment_id: &PaymentId) -> Result<Option<Payment>>;

    /// Insert a payment. Payments are immutable, so an existing id is a conflict.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the id is already stored.
    fn insert_payment(&self, payment: &Payment) -> Result<()>;

    /// List a customer's payments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_payments_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Payment>>;
}

/// Check the not-null style constraints on a customer record.
pub(crate) fn check_customer_constraints(customer: &Customer) -> Result<()> {
    if customer.name.trim().is_empty() {
        return Err(StoreError::Constraint("customer name must not be empty".into()));
    }
    if customer.phone_number.trim().is_empty() {
        return Err(StoreError::Constraint(
            "customer phone number must not be empty".into(),
        ));
    }
    Ok(())
}
