//! In-memory storage implementation.
//!
//! Used by tests and by deployments that don't need durability.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use paydesk_core::{Customer, CustomerId, Payment, PaymentId};

use crate::error::{Result, StoreError};
use crate::{check_customer_constraints, CustomerStore, PaymentStore};

#[derive(Debug, Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    customers_by_phone: HashMap<String, CustomerId>,
    // BTreeMap keeps ULID order, i.e. creation order.
    payments: BTreeMap<PaymentId, Payment>,
}

/// A thread-safe in-memory store.
///
/// Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

impl CustomerStore for MemoryStore {
    fn get_customer(&self, customer_id: &CustomerId) -> Result<Option<Customer>> {
        Ok(self.read()?.customers.get(customer_id).cloned())
    }

    fn find_customer_by_phone(&self, phone_number: &str) -> Result<Option<Customer>> {
        let tables = self.read()?;
        Ok(tables
            .customers_by_phone
            .get(phone_number)
            .and_then(|id| tables.customers.get(id))
            .cloned())
    }

    fn insert_customer(&self, customer: &Customer) -> Result<()> {
        check_customer_constraints(customer)?;

        let mut tables = self.write()?;
        if tables.customers.contains_key(&customer.id) {
            return Err(StoreError::Conflict {
                entity: "customer",
                key: customer.id.to_string(),
            });
        }
        if tables
            .customers_by_phone
            .contains_key(&customer.phone_number)
        {
            return Err(StoreError::Conflict {
                entity: "phone number",
                key: customer.phone_number.clone(),
            });
        }

        tables
            .customers_by_phone
            .insert(customer.phone_number.clone(), customer.id);
        tables.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    fn delete_customer(&self, customer_id: &CustomerId) -> Result<()> {
        let mut tables = self.write()?;
        let customer = tables
            .customers
            .remove(customer_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "customer",
                id: customer_id.to_string(),
            })?;
        tables.customers_by_phone.remove(&customer.phone_number);
        Ok(())
    }
}

impl PaymentStore for MemoryStore {
    fn get_payment(&self, payment_id: &PaymentId) -> Result<Option<Payment>> {
        Ok(self.read()?.payments.get(payment_id).cloned())
    }

    fn insert_payment(&self, payment: &Payment) -> Result<()> {
        let mut tables = self.write()?;
        if tables.payments.contains_key(&payment.id) {
            return Err(StoreError::Conflict {
                entity: "payment",
                key: payment.id.to_string(),
            });
        }
        tables.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    fn list_payments_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Payment>> {
        Ok(self
            .read()?
            .payments
            .values()
            .filter(|p| p.customer_id == *customer_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paydesk_core::{Amount, Currency, NewCustomer, NewPayment};
    use rust_decimal_macros::dec;

    fn customer(name: &str, phone: &str) -> Customer {
        NewCustomer::new(None, name, phone).into_customer()
    }

    #[test]
    fn select_customer_by_phone_number() {
        let store = MemoryStore::new();
        let hansel = customer("Hansel", "+441111111111");
        store.insert_customer(&hansel).unwrap();

        let found = store.find_customer_by_phone("+441111111111").unwrap();
        assert_eq!(found, Some(hansel.clone()));
        assert_eq!(store.get_customer(&hansel.id).unwrap(), Some(hansel));
    }

    #[test]
    fn unknown_phone_number_selects_nothing() {
        let store = MemoryStore::new();
        assert!(store.find_customer_by_phone("+440000000000").unwrap().is_none());
    }

    #[test]
    fn phone_number_is_unique() {
        let store = MemoryStore::new();
        store.insert_customer(&customer("Harden", "+440000000008")).unwrap();

        let result = store.insert_customer(&customer("Westbrook", "+440000000008"));
        assert!(matches!(
            result,
            Err(StoreError::Conflict {
                entity: "phone number",
                ..
            })
        ));
    }

    #[test]
    fn empty_name_or_phone_is_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.insert_customer(&customer("", "+441111111111")),
            Err(StoreError::Constraint(_))
        ));
        assert!(matches!(
            store.insert_customer(&customer("Daisy", "")),
            Err(StoreError::Constraint(_))
        ));
        assert!(store.find_customer_by_phone("+441111111111").unwrap().is_none());
    }

    #[test]
    fn delete_frees_phone_number() {
        let store = MemoryStore::new();
        let bruce = customer("Bruce", "+441111111111");
        store.insert_customer(&bruce).unwrap();
        store.delete_customer(&bruce.id).unwrap();

        assert!(store.get_customer(&bruce.id).unwrap().is_none());
        store.insert_customer(&customer("Wayne", "+441111111111")).unwrap();

        assert!(matches!(
            store.delete_customer(&bruce.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn payments_insert_and_list() {
        let store = MemoryStore::new();
        let customer_id = CustomerId::generate();
        let payment = NewPayment::new(
            Amount::new(dec!(10.00)).unwrap(),
            Currency::Usd,
            "card123",
            "Donation",
        )
        .into_payment(customer_id);

        store.insert_payment(&payment).unwrap();
        assert_eq!(store.get_payment(&payment.id).unwrap(), Some(payment.clone()));
        assert!(matches!(
            store.insert_payment(&payment),
            Err(StoreError::Conflict { entity: "payment", .. })
        ));

        let listed = store.list_payments_by_customer(&customer_id).unwrap();
        assert_eq!(listed, vec![payment]);
        assert!(store
            .list_payments_by_customer(&CustomerId::generate())
            .unwrap()
            .is_empty());
    }
}
