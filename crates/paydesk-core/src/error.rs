//! Error types for paydesk.

use crate::ids::{CustomerId, IdError};
use crate::payment::Currency;

/// Result type for paydesk operations.
pub type Result<T> = std::result::Result<T, PaydeskError>;

/// Errors raised by the registration and payment workflows.
///
/// Every variant names the value that caused it.
#[derive(Debug, thiserror::Error)]
pub enum PaydeskError {
    /// The phone number does not match the accepted format.
    #[error("Phone number {phone_number} is not valid")]
    InvalidPhoneNumber {
        /// The rejected phone number.
        phone_number: String,
    },

    /// Another customer is already registered with this phone number.
    #[error("phone number {phone_number} is taken")]
    PhoneNumberTaken {
        /// The phone number in use.
        phone_number: String,
    },

    /// No customer exists with the given id.
    #[error("Customer with id {customer_id} not found")]
    CustomerNotFound {
        /// The missing customer.
        customer_id: CustomerId,
    },

    /// The currency is not in the accepted set.
    #[error("{currency} not supported")]
    UnsupportedCurrency {
        /// The rejected currency.
        currency: Currency,
    },

    /// The currency code is not one the system knows.
    #[error("unknown currency code: {code}")]
    UnknownCurrency {
        /// The unrecognised code.
        code: String,
    },

    /// The card charger reported that the card was not debited.
    #[error("Card not debited for customer {customer_id}")]
    CardNotDebited {
        /// The customer whose card was charged.
        customer_id: CustomerId,
    },

    /// The card charger could not complete the request.
    #[error("Cannot make card charge for customer {customer_id}: {reason}")]
    ChargeFailed {
        /// The customer being charged.
        customer_id: CustomerId,
        /// Provider or transport error.
        reason: String,
    },

    /// A record with the same identifier already exists.
    #[error("{0}")]
    Duplicate(String),

    /// The customer record is incomplete (e.g. empty name).
    #[error("invalid customer: {0}")]
    InvalidCustomer(String),

    /// Invalid amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),
}
