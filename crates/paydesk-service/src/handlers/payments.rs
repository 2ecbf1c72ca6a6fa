//! Payment handlers.

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;

use paydesk_core::{CustomerId, PaydeskError, Payment, PaymentId, PaymentRequest};

use super::{ApiJson, ApiPath};
use crate::error::ApiError;
use crate::state::AppState;

/// Payments of one customer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListResponse {
    /// The customer.
    pub customer_id: CustomerId,
    /// Payments, oldest first.
    pub payments: Vec<Payment>,
}

/// Charge a card and record the payment.
///
/// The customer is taken from `payment.customerId`.
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<PaymentRequest>,
) -> Result<ApiJson<Payment>, ApiError> {
    let customer_id = request
        .payment
        .customer_id
        .ok_or_else(|| ApiError::BadRequest("payment.customerId is required".into()))?;

    let payment = state
        .payment_service
        .charge_card(customer_id, request)
        .await?;

    Ok(ApiJson(payment))
}

/// Get a payment by id.
pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    ApiPath(payment_id): ApiPath<PaymentId>,
) -> Result<ApiJson<Payment>, ApiError> {
    state
        .payments
        .get_payment(&payment_id)?
        .map(ApiJson)
        .ok_or_else(|| ApiError::NotFound(format!("Payment with id {payment_id} not found")))
}

/// List a customer's payments.
pub async fn list_customer_payments(
    State(state): State<Arc<AppState>>,
    ApiPath(customer_id): ApiPath<CustomerId>,
) -> Result<ApiJson<PaymentListResponse>, ApiError> {
    if state.customers.get_customer(&customer_id)?.is_none() {
        return Err(PaydeskError::CustomerNotFound { customer_id }.into());
    }

    let payments = state.payments.list_payments_by_customer(&customer_id)?;

    Ok(ApiJson(PaymentListResponse {
        customer_id,
        payments,
    }))
}
