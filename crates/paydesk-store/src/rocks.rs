//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the store traits.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use paydesk_core::{Customer, CustomerId, Payment, PaymentId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{check_customer_constraints, CustomerStore, PaymentStore};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    // Serializes check-then-write inserts so unique keys stay unique.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    fn lock_writes(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    fn exists(&self, cf_name: &str, key: &[u8]) -> Result<bool> {
        let cf = self.cf(cf_name)?;
        let found = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        Ok(found)
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl CustomerStore for RocksStore {
    fn get_customer(&self, customer_id: &CustomerId) -> Result<Option<Customer>> {
        let cf = self.cf(cf::CUSTOMERS)?;
        let key = keys::customer_key(customer_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn find_customer_by_phone(&self, phone_number: &str) -> Result<Option<Customer>> {
        let cf = self.cf(cf::CUSTOMERS_BY_PHONE)?;
        let key = keys::phone_key(phone_number);

        let Some(value) = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let customer_id = keys::customer_id_from_value(&value).ok_or_else(|| {
            StoreError::Serialization(format!("corrupt phone index entry for {phone_number}"))
        })?;

        let customer = self.get_customer(&customer_id)?;
        if customer.is_none() {
            tracing::warn!(
                phone_number = %phone_number,
                customer_id = %customer_id,
                "Phone index points at a missing customer"
            );
        }
        Ok(customer)
    }

    fn insert_customer(&self, customer: &Customer) -> Result<()> {
        check_customer_constraints(customer)?;

        let cf_customers = self.cf(cf::CUSTOMERS)?;
        let cf_by_phone = self.cf(cf::CUSTOMERS_BY_PHONE)?;

        let customer_key = keys::customer_key(&customer.id);
        let phone_key = keys::phone_key(&customer.phone_number);
        let value = Self::serialize(customer)?;

        let _guard = self.lock_writes()?;

        if self.exists(cf::CUSTOMERS, &customer_key)? {
            return Err(StoreError::Conflict {
                entity: "customer",
                key: customer.id.to_string(),
            });
        }
        if self.exists(cf::CUSTOMERS_BY_PHONE, &phone_key)? {
            return Err(StoreError::Conflict {
                entity: "phone number",
                key: customer.phone_number.clone(),
            });
        }

        // Write atomically
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_customers, &customer_key, &value);
        batch.put_cf(&cf_by_phone, &phone_key, &customer_key);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn delete_customer(&self, customer_id: &CustomerId) -> Result<()> {
        let cf_customers = self.cf(cf::CUSTOMERS)?;
        let cf_by_phone = self.cf(cf::CUSTOMERS_BY_PHONE)?;

        let _guard = self.lock_writes()?;

        let customer = self
            .get_customer(customer_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "customer",
                id: customer_id.to_string(),
            })?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_customers, keys::customer_key(customer_id));
        batch.delete_cf(&cf_by_phone, keys::phone_key(&customer.phone_number));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

impl PaymentStore for RocksStore {
    fn get_payment(&self, payment_id: &PaymentId) -> Result<Option<Payment>> {
        let cf = self.cf(cf::PAYMENTS)?;
        let key = keys::payment_key(payment_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn insert_payment(&self, payment: &Payment) -> Result<()> {
        let cf_payments = self.cf(cf::PAYMENTS)?;
        let cf_by_customer = self.cf(cf::PAYMENTS_BY_CUSTOMER)?;

        let payment_key = keys::payment_key(&payment.id);
        let index_key = keys::customer_payment_key(&payment.customer_id, &payment.id);
        let value = Self::serialize(payment)?;

        let _guard = self.lock_writes()?;

        if self.exists(cf::PAYMENTS, &payment_key)? {
            return Err(StoreError::Conflict {
                entity: "payment",
                key: payment.id.to_string(),
            });
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_payments, &payment_key, &value);
        batch.put_cf(&cf_by_customer, &index_key, b""); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_payments_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Payment>> {
        let cf_by_customer = self.cf(cf::PAYMENTS_BY_CUSTOMER)?;
        let prefix = keys::customer_payments_prefix(customer_id);

        let iter = self
            .db
            .iterator_cf(&cf_by_customer, IteratorMode::From(&prefix, Direction::Forward));

        let mut payments = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let Some(payment_id) = keys::extract_payment_id(&key) else {
                tracing::warn!(customer_id = %customer_id, "Skipping malformed payment index key");
                continue;
            };
            if let Some(payment) = self.get_payment(&payment_id)? {
                payments.push(payment);
            }
        }

        Ok(payments)
    }
}
