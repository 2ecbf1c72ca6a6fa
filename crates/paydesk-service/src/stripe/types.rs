//! Stripe API types.

use serde::Deserialize;

/// Stripe charge object.
#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    /// Charge ID.
    pub id: String,
    /// Amount in minor units.
    #[serde(default)]
    pub amount: i64,
    /// Currency (e.g., "gbp").
    #[serde(default)]
    pub currency: String,
    /// Whether the charge succeeded and the card was debited.
    #[serde(default)]
    pub paid: bool,
    /// Status (succeeded, pending, failed).
    #[serde(default)]
    pub status: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Why the charge failed, if it did.
    #[serde(default)]
    pub failure_message: Option<String>,
}

/// Stripe error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}
