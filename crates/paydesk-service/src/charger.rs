//! Card charging boundary.
//!
//! The payment workflow only sees [`CardCharger`]; provider wire formats
//! stay behind implementations such as [`crate::stripe::StripeClient`].

use async_trait::async_trait;
use paydesk_core::{Amount, Currency};

/// What the provider needs to attempt a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    /// Payment instrument token.
    pub source: String,
    /// Amount to debit.
    pub amount: Amount,
    /// Currency of the amount.
    pub currency: Currency,
    /// Description shown on the provider side.
    pub description: String,
}

/// Outcome of a charge attempt that reached the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPaymentCharge {
    /// Whether the card was actually debited.
    pub card_debited: bool,
}

impl CardPaymentCharge {
    /// Create an outcome.
    #[must_use]
    pub const fn new(card_debited: bool) -> Self {
        Self { card_debited }
    }
}

/// A charge attempt that could not be completed.
#[derive(Debug, thiserror::Error)]
#[error("{provider} charge failed: {message}")]
pub struct ChargeError {
    /// Provider name.
    pub provider: &'static str,
    /// Provider or transport error message.
    pub message: String,
}

impl ChargeError {
    /// Create a charge error for `provider`.
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

/// Attempts to debit a payment source.
#[async_trait]
pub trait CardCharger: Send + Sync {
    /// Charge the card described by `request`.
    ///
    /// `Ok` means the provider answered; check `card_debited` for the result.
    async fn charge_card(&self, request: &ChargeRequest) -> Result<CardPaymentCharge, ChargeError>;
}

/// Charger used when no provider credential is configured.
///
/// Every charge is reported as debited; nothing leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxCharger;

#[async_trait]
impl CardCharger for SandboxCharger {
    async fn charge_card(&self, request: &ChargeRequest) -> Result<CardPaymentCharge, ChargeError> {
        tracing::warn!(
            amount = %request.amount,
            currency = %request.currency,
            description = %request.description,
            "Sandbox charger in use - card not actually charged"
        );
        Ok(CardPaymentCharge::new(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn sandbox_always_debits() {
        let request = ChargeRequest {
            source: "card123".into(),
            amount: Amount::new(dec!(10.00)).unwrap(),
            currency: Currency::Usd,
            description: "Donation".into(),
        };
        let charge = SandboxCharger.charge_card(&request).await.unwrap();
        assert!(charge.card_debited);
    }

    #[test]
    fn charge_error_message_names_provider() {
        let err = ChargeError::new("stripe", "card_declined");
        assert_eq!(err.to_string(), "stripe charge failed: card_declined");
    }
}
