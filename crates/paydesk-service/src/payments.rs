//! Payment charging workflow.

use std::sync::Arc;

use paydesk_core::{
    Currency, CustomerId, PaydeskError, Payment, PaymentRequest, Result,
    DEFAULT_ACCEPTED_CURRENCIES,
};
use paydesk_store::{CustomerStore, PaymentStore};

use crate::charger::{CardCharger, ChargeRequest};

/// Charges a customer's card and records the payment when it goes through.
#[derive(Clone)]
pub struct PaymentService {
    customers: Arc<dyn CustomerStore>,
    payments: Arc<dyn PaymentStore>,
    charger: Arc<dyn CardCharger>,
    accepted_currencies: Vec<Currency>,
}

impl PaymentService {
    /// Create the workflow accepting [`DEFAULT_ACCEPTED_CURRENCIES`].
    #[must_use]
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        payments: Arc<dyn PaymentStore>,
        charger: Arc<dyn CardCharger>,
    ) -> Self {
        Self {
            customers,
            payments,
            charger,
            accepted_currencies: DEFAULT_ACCEPTED_CURRENCIES.to_vec(),
        }
    }

    /// Replace the accepted currency set.
    #[must_use]
    pub fn with_accepted_currencies(mut self, currencies: Vec<Currency>) -> Self {
        self.accepted_currencies = currencies;
        self
    }

    /// Currencies this workflow will charge.
    #[must_use]
    pub fn accepted_currencies(&self) -> &[Currency] {
        &self.accepted_currencies
    }

    /// Charge `customer_id` for the payment in `request`.
    ///
    /// Checks run in order (customer exists, currency accepted, amount
    /// expressible in the currency, card debited) and the first failure
    /// stops everything after it. The payment is stored, stamped with
    /// `customer_id`, only after a successful charge.
    ///
    /// # Errors
    ///
    /// - `PaydeskError::CustomerNotFound` if no such customer exists.
    /// - `PaydeskError::UnsupportedCurrency` if the currency is not accepted.
    /// - `PaydeskError::InvalidAmount` if the amount is finer than the
    ///   currency's minor unit.
    /// - `PaydeskError::ChargeFailed` if the charger could not complete.
    /// - `PaydeskError::CardNotDebited` if the charger declined the card.
    /// - `PaydeskError::Storage` on backend failure.
    pub async fn charge_card(
        &self,
        customer_id: CustomerId,
        request: PaymentRequest,
    ) -> Result<Payment> {
        if self.customers.get_customer(&customer_id)?.is_none() {
            tracing::debug!(customer_id = %customer_id, "Charge for unknown customer");
            return Err(PaydeskError::CustomerNotFound { customer_id });
        }

        let candidate = request.payment;
        if !self.accepted_currencies.contains(&candidate.currency) {
            tracing::debug!(
                customer_id = %customer_id,
                currency = %candidate.currency,
                "Charge in unsupported currency"
            );
            return Err(PaydeskError::UnsupportedCurrency {
                currency: candidate.currency,
            });
        }

        if candidate.amount.to_minor_units(candidate.currency).is_none() {
            tracing::debug!(
                customer_id = %customer_id,
                amount = %candidate.amount,
                currency = %candidate.currency,
                "Charge amount finer than currency minor unit"
            );
            return Err(PaydeskError::InvalidAmount(format!(
                "{} cannot be charged in {}",
                candidate.amount, candidate.currency
            )));
        }

        let charge_request = ChargeRequest {
            source: candidate.source.clone(),
            amount: candidate.amount,
            currency: candidate.currency,
            description: candidate.description.clone(),
        };

        let charge = self
            .charger
            .charge_card(&charge_request)
            .await
            .map_err(|e| {
                tracing::warn!(customer_id = %customer_id, error = %e, "Card charge failed");
                PaydeskError::ChargeFailed {
                    customer_id,
                    reason: e.to_string(),
                }
            })?;

        if !charge.card_debited {
            tracing::info!(customer_id = %customer_id, "Card not debited");
            return Err(PaydeskError::CardNotDebited { customer_id });
        }

        let payment = candidate.into_payment(customer_id);
        if let Err(e) = self.payments.insert_payment(&payment) {
            // The charge has already gone through and is not reversed.
            tracing::error!(
                customer_id = %customer_id,
                payment_id = %payment.id,
                amount = %payment.amount,
                currency = %payment.currency,
                error = %e,
                "Card charged but payment could not be stored"
            );
            return Err(e.into());
        }

        tracing::info!(
            customer_id = %customer_id,
            payment_id = %payment.id,
            amount = %payment.amount,
            currency = %payment.currency,
            "Payment recorded"
        );

        Ok(payment)
    }
}
