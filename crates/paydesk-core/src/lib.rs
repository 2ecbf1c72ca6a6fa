//! Core types and utilities for paydesk.
//!
//! This crate provides the domain types shared by the store and the service:
//!
//! - **Identifiers**: `CustomerId`, `PaymentId`
//! - **Customers**: `Customer`, `NewCustomer`, `CustomerRegistrationRequest`
//! - **Payments**: `Payment`, `NewPayment`, `PaymentRequest`, `Amount`, `Currency`
//! - **Validation**: `PhoneNumberValidator`, `PhoneNumberPolicy`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod customer;
pub mod error;
pub mod ids;
pub mod payment;
pub mod phone;

pub use customer::{Customer, CustomerRegistrationRequest, NewCustomer};
pub use error::{PaydeskError, Result};
pub use ids::{CustomerId, IdError, PaymentId};
pub use payment::{
    Amount, Currency, NewPayment, Payment, PaymentRequest, DEFAULT_ACCEPTED_CURRENCIES,
};
pub use phone::{PhoneNumberPolicy, PhoneNumberValidator};
