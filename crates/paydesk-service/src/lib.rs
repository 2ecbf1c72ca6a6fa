//! Paydesk HTTP API service.
//!
//! This crate provides the two paydesk workflows and the HTTP surface over
//! them:
//!
//! - Customer registration with phone number validation and uniqueness
//! - Card charging through a [`CardCharger`] with a currency allow-list
//!
//! # Charging
//!
//! With a Stripe key configured, charges go to [`StripeClient`]. Without
//! one, the [`SandboxCharger`] reports every card as debited.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)]

pub mod charger;
pub mod config;
pub mod error;
pub mod handlers;
pub mod payments;
pub mod registration;
pub mod routes;
pub mod state;
pub mod stripe;

pub use charger::{CardCharger, CardPaymentCharge, ChargeError, ChargeRequest, SandboxCharger};
pub use config::{ServiceConfig, StorageBackend};
pub use error::ApiError;
pub use payments::PaymentService;
pub use registration::CustomerRegistrationService;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
