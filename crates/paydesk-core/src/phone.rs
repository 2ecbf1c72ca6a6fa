//! Phone number validation.
//!
//! A valid number is `+`, an accepted country code, then a fixed number of
//! subscriber digits, with nothing else in the string.

/// Rules applied by [`PhoneNumberValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumberPolicy {
    /// Accepted country calling codes, digits only (e.g. `"44"`).
    pub country_codes: Vec<String>,

    /// Exact number of digits after the country code.
    pub subscriber_digits: usize,
}

impl Default for PhoneNumberPolicy {
    fn default() -> Self {
        Self {
            country_codes: vec!["44".to_string()],
            subscriber_digits: 10,
        }
    }
}

/// Validates phone numbers against a [`PhoneNumberPolicy`].
#[derive(Debug, Clone, Default)]
pub struct PhoneNumberValidator {
    policy: PhoneNumberPolicy,
}

impl PhoneNumberValidator {
    /// Create a validator for the given policy.
    #[must_use]
    pub fn new(policy: PhoneNumberPolicy) -> Self {
        Self { policy }
    }

    /// Returns `true` iff `phone_number` matches the policy exactly.
    #[must_use]
    pub fn is_valid(&self, phone_number: &str) -> bool {
        let Some(digits) = phone_number.strip_prefix('+') else {
            return false;
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }

        self.policy.country_codes.iter().any(|code| {
            digits
                .strip_prefix(code.as_str())
                .is_some_and(|subscriber| subscriber.len() == self.policy.subscriber_digits)
        })
    }
}
