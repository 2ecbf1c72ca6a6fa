//! Stripe API client implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use paydesk_core::{Amount, Currency};

use super::types::{Charge, StripeErrorResponse};
use crate::charger::{CardCharger, CardPaymentCharge, ChargeError, ChargeRequest};

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The amount cannot be expressed in the currency's minor unit.
    #[error("amount {amount} cannot be charged in {currency}")]
    InvalidAmount {
        /// The amount.
        amount: Amount,
        /// The currency.
        currency: Currency,
    },
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StripeClient {
    /// Public Stripe API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.stripe.com";

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    /// * `base_url` - API root without the version segment
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Http` if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, StripeError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a charge against a card source.
    pub async fn create_charge(&self, request: &ChargeRequest) -> Result<Charge, StripeError> {
        let amount_minor = request
            .amount
            .to_minor_units(request.currency)
            .ok_or(StripeError::InvalidAmount {
                amount: request.amount,
                currency: request.currency,
            })?;

        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", request.currency.code().to_ascii_lowercase()),
            ("source", request.source.clone()),
            ("description", request.description.clone()),
        ];

        tracing::debug!(
            amount_minor = %amount_minor,
            currency = %request.currency,
            "Creating Stripe charge"
        );

        let response = self
            .client
            .post(format!("{}/v1/charges", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

#[async_trait]
impl CardCharger for StripeClient {
    async fn charge_card(&self, request: &ChargeRequest) -> Result<CardPaymentCharge, ChargeError> {
        match self.create_charge(request).await {
            Ok(charge) => {
                if !charge.paid {
                    tracing::info!(
                        charge_id = %charge.id,
                        status = %charge.status,
                        failure = ?charge.failure_message,
                        "Stripe charge not paid"
                    );
                }
                Ok(CardPaymentCharge::new(charge.paid))
            }
            // A card decline is an answer from the provider, not a failure to reach it.
            Err(StripeError::Api {
                error_type,
                message,
                ..
            }) if error_type == "card_error" => {
                tracing::info!(message = %message, "Stripe declined card");
                Ok(CardPaymentCharge::new(false))
            }
            Err(e) => Err(ChargeError::new("stripe", e.to_string())),
        }
    }
}
