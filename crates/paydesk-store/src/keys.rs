//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in column families.

use paydesk_core::{CustomerId, PaymentId};

/// Create a customer key from a customer ID.
#[must_use]
pub fn customer_key(customer_id: &CustomerId) -> Vec<u8> {
    customer_id.as_bytes().to_vec()
}

/// Create a phone index key.
#[must_use]
pub fn phone_key(phone_number: &str) -> Vec<u8> {
    phone_number.as_bytes().to_vec()
}

/// Decode the customer ID stored as a phone index value.
///
/// Returns `None` if the value is not 16 bytes long.
#[must_use]
pub fn customer_id_from_value(value: &[u8]) -> Option<CustomerId> {
    let bytes: [u8; 16] = value.try_into().ok()?;
    Some(CustomerId::from_bytes(bytes))
}

/// Create a payment key from a payment ID.
#[must_use]
pub fn payment_key(payment_id: &PaymentId) -> Vec<u8> {
    payment_id.to_bytes().to_vec()
}

/// Create a customer-payment index key.
///
/// Format: `customer_id (16 bytes) || payment_id (16 bytes)`
///
/// Since ULIDs are time-ordered, a customer's payments sort by creation time.
#[must_use]
pub fn customer_payment_key(customer_id: &CustomerId, payment_id: &PaymentId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(customer_id.as_bytes());
    key.extend_from_slice(&payment_id.to_bytes());
    key
}

/// Create a prefix for iterating all payments of a customer.
#[must_use]
pub fn customer_payments_prefix(customer_id: &CustomerId) -> Vec<u8> {
    customer_id.as_bytes().to_vec()
}

/// Extract the payment ID from a customer-payment index key.
///
/// Returns `None` if the key is not exactly 32 bytes.
#[must_use]
pub fn extract_payment_id(key: &[u8]) -> Option<PaymentId> {
    if key.len() != 32 {
        return None;
    }
    let bytes: [u8; 16] = key[16..32].try_into().ok()?;
    Some(PaymentId::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_payment_key_format() {
        let customer_id = CustomerId::generate();
        let payment_id = PaymentId::generate();
        let key = customer_payment_key(&customer_id, &payment_id);

        assert_eq!(key.len(), 32);
        assert_eq!(&key[..16], customer_id.as_bytes());
        assert_eq!(&key[16..], payment_id.to_bytes());
        assert_eq!(extract_payment_id(&key), Some(payment_id));
    }

    #[test]
    fn malformed_index_entries_decode_to_none() {
        assert_eq!(extract_payment_id(&[0u8; 31]), None);
        assert_eq!(customer_id_from_value(&[0u8; 15]), None);
    }

    #[test]
    fn phone_index_value_decodes() {
        let customer_id = CustomerId::generate();
        assert_eq!(
            customer_id_from_value(&customer_key(&customer_id)),
            Some(customer_id)
        );
    }
}
