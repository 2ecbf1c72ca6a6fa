//! Payment types for paydesk.
//!
//! Amounts are exact decimals (`rust_decimal`), never floats. A payment is
//! only ever built for storage after the card has been debited.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaydeskError;
use crate::{CustomerId, PaymentId};

/// Currencies known to the system.
///
/// Only a configured subset is accepted for charging, see
/// [`DEFAULT_ACCEPTED_CURRENCIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar.
    Usd,
    /// Pound sterling.
    Gbp,
    /// Euro.
    Eur,
}

/// Currencies accepted for charging unless configured otherwise.
pub const DEFAULT_ACCEPTED_CURRENCIES: [Currency; 2] = [Currency::Usd, Currency::Gbp];

impl Currency {
    /// ISO 4217 code, upper case.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
        }
    }

    /// Number of decimal places in the currency's minor unit.
    #[must_use]
    pub const fn minor_unit_exponent(self) -> u32 {
        match self {
            Self::Usd | Self::Gbp | Self::Eur => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PaydeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "GBP" => Ok(Self::Gbp),
            "EUR" => Ok(Self::Eur),
            other => Err(PaydeskError::UnknownCurrency {
                code: other.to_string(),
            }),
        }
    }
}

/// A strictly positive monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns `PaydeskError::InvalidAmount` if `value <= 0`.
    pub fn new(value: Decimal) -> Result<Self, PaydeskError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaydeskError::InvalidAmount(format!(
                "amount must be positive, got {value}"
            )))
        }
    }

    /// The decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Express the amount in minor units (e.g. pence) of `currency`.
    ///
    /// Returns `None` if the amount has more decimal places than the
    /// currency allows or does not fit in an `i64`.
    #[must_use]
    pub fn to_minor_units(&self, currency: Currency) -> Option<i64> {
        let factor = Decimal::from(10_i64.checked_pow(currency.minor_unit_exponent())?);
        let scaled = self.0.checked_mul(factor)?;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_i64()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaydeskError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A payment as submitted for charging.
///
/// `customer_id` is carried for transport only; the charging workflow
/// always stamps the payment with the customer it was charged against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    /// Caller-chosen identifier, if any.
    #[serde(default)]
    pub id: Option<PaymentId>,

    /// Customer the payment is for.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,

    /// Amount to charge.
    pub amount: Amount,

    /// Currency of the amount.
    pub currency: Currency,

    /// Opaque payment instrument token (card source).
    pub source: String,

    /// Free-text description passed to the provider.
    #[serde(default)]
    pub description: String,
}

impl NewPayment {
    /// Create a payment candidate without ids.
    pub fn new(
        amount: Amount,
        currency: Currency,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            customer_id: None,
            amount,
            currency,
            source: source.into(),
            description: description.into(),
        }
    }

    /// Build the stored record for `customer_id`, generating an id if none was given.
    #[must_use]
    pub fn into_payment(self, customer_id: CustomerId) -> Payment {
        Payment {
            id: self.id.unwrap_or_else(PaymentId::generate),
            customer_id,
            amount: self.amount,
            currency: self.currency,
            source: self.source,
            description: self.description,
            created_at: Utc::now(),
        }
    }
}

/// Payment request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// The payment to charge.
    pub payment: NewPayment,
}

impl PaymentRequest {
    /// Wrap a candidate in a request.
    #[must_use]
    pub fn new(payment: NewPayment) -> Self {
        Self { payment }
    }
}

/// A persisted payment. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment identifier.
    pub id: PaymentId,

    /// The customer that was charged.
    pub customer_id: CustomerId,

    /// Amount charged.
    pub amount: Amount,

    /// Currency charged.
    pub currency: Currency,

    /// Payment instrument token.
    pub source: String,

    /// Description.
    pub description: String,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
