//! Error types for paydesk storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// A unique key is already taken.
    #[error("{entity} already exists: {key}")]
    Conflict {
        /// Kind of record.
        entity: &'static str,
        /// The duplicated key (id or phone number).
        key: String,
    },

    /// A required field is missing or empty.
    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<StoreError> for paydesk_core::PaydeskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict {
                entity: "phone number",
                key,
            } => Self::PhoneNumberTaken { phone_number: key },
            conflict @ StoreError::Conflict { .. } => Self::Duplicate(conflict.to_string()),
            StoreError::Constraint(msg) => Self::InvalidCustomer(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paydesk_core::PaydeskError;

    #[test]
    fn phone_conflict_maps_to_phone_number_taken() {
        let err: PaydeskError = StoreError::Conflict {
            entity: "phone number",
            key: "+447123456789".into(),
        }
        .into();
        assert_eq!(err.to_string(), "phone number +447123456789 is taken");
    }

    #[test]
    fn id_conflict_maps_to_duplicate() {
        let err: PaydeskError = StoreError::Conflict {
            entity: "payment",
            key: "01HZ".into(),
        }
        .into();
        assert!(matches!(err, PaydeskError::Duplicate(msg) if msg == "payment already exists: 01HZ"));
    }

    #[test]
    fn other_errors_map_to_storage() {
        let err: PaydeskError = StoreError::Database("disk full".into()).into();
        assert!(matches!(err, PaydeskError::Storage(msg) if msg.contains("disk full")));
    }
}
