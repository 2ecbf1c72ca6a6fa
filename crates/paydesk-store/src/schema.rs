//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Customer records, keyed by `customer_id`.
    pub const CUSTOMERS: &str = "customers";

    /// Unique index: phone number to `customer_id`.
    pub const CUSTOMERS_BY_PHONE: &str = "customers_by_phone";

    /// Payment records, keyed by `payment_id` (ULID).
    pub const PAYMENTS: &str = "payments";

    /// Index: payments by customer, keyed by `customer_id || payment_id`.
    /// Value is empty (index only).
    pub const PAYMENTS_BY_CUSTOMER: &str = "payments_by_customer";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::CUSTOMERS,
        cf::CUSTOMERS_BY_PHONE,
        cf::PAYMENTS,
        cf::PAYMENTS_BY_CUSTOMER,
    ]
}
