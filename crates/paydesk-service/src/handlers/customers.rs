//! Customer handlers.

use std::sync::Arc;

use axum::extract::State;

use paydesk_core::{Customer, CustomerId, CustomerRegistrationRequest, PaydeskError};

use super::{ApiJson, ApiPath};
use crate::error::ApiError;
use crate::state::AppState;

/// Register a new customer.
pub async fn register_customer(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CustomerRegistrationRequest>,
) -> Result<ApiJson<Customer>, ApiError> {
    let customer = state.registration.register_new_customer(request)?;
    Ok(ApiJson(customer))
}

/// Get a customer by id.
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    ApiPath(customer_id): ApiPath<CustomerId>,
) -> Result<ApiJson<Customer>, ApiError> {
    state
        .customers
        .get_customer(&customer_id)?
        .map(ApiJson)
        .ok_or_else(|| PaydeskError::CustomerNotFound { customer_id }.into())
}
