//! Application state.

use std::sync::Arc;

use paydesk_core::PhoneNumberValidator;
use paydesk_store::{CustomerStore, PaymentStore};

use crate::charger::{CardCharger, SandboxCharger};
use crate::config::ServiceConfig;
use crate::payments::PaymentService;
use crate::registration::CustomerRegistrationService;
use crate::stripe::StripeClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Customer lookups for read endpoints.
    pub customers: Arc<dyn CustomerStore>,

    /// Payment lookups for read endpoints.
    pub payments: Arc<dyn PaymentStore>,

    /// Registration workflow.
    pub registration: CustomerRegistrationService,

    /// Charging workflow.
    pub payment_service: PaymentService,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Uses Stripe when an API key is configured and the sandbox charger
    /// otherwise.
    #[must_use]
    pub fn new<S>(store: Arc<S>, config: ServiceConfig) -> Self
    where
        S: CustomerStore + PaymentStore + 'static,
    {
        let stripe = config.stripe_api_key.as_ref().and_then(|key| {
            match StripeClient::new(key, config.stripe_api_base.clone()) {
                Ok(client) => {
                    tracing::info!(
                        api_base = %config.stripe_api_base,
                        "Stripe integration enabled"
                    );
                    Some(client)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Stripe client");
                    None
                }
            }
        });

        let charger: Arc<dyn CardCharger> = match stripe {
            Some(client) => Arc::new(client),
            None => {
                tracing::warn!(
                    "Stripe not configured - using sandbox charger, cards will not be debited"
                );
                Arc::new(SandboxCharger)
            }
        };

        Self::with_charger(store, charger, config)
    }

    /// Create application state with an explicit charger.
    #[must_use]
    pub fn with_charger<S>(
        store: Arc<S>,
        charger: Arc<dyn CardCharger>,
        config: ServiceConfig,
    ) -> Self
    where
        S: CustomerStore + PaymentStore + 'static,
    {
        let customers: Arc<dyn CustomerStore> = store.clone();
        let payments: Arc<dyn PaymentStore> = store;

        let registration = CustomerRegistrationService::new(
            customers.clone(),
            PhoneNumberValidator::new(config.phone_policy.clone()),
        );
        let payment_service = PaymentService::new(customers.clone(), payments.clone(), charger)
            .with_accepted_currencies(config.accepted_currencies.clone());

        Self {
            customers,
            payments,
            registration,
            payment_service,
            config,
        }
    }
}
