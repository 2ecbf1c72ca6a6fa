//! Customer registration workflow.

use std::sync::Arc;

use paydesk_core::{
    Customer, CustomerRegistrationRequest, PaydeskError, PhoneNumberValidator, Result,
};
use paydesk_store::CustomerStore;

/// Registers customers whose phone number is valid and not yet in use.
#[derive(Clone)]
pub struct CustomerRegistrationService {
    customers: Arc<dyn CustomerStore>,
    validator: PhoneNumberValidator,
}

impl CustomerRegistrationService {
    /// Create the workflow over a customer store.
    #[must_use]
    pub fn new(customers: Arc<dyn CustomerStore>, validator: PhoneNumberValidator) -> Self {
        Self {
            customers,
            validator,
        }
    }

    /// Register the customer in `request`.
    ///
    /// Any existing customer with the same phone number is a conflict, even
    /// when the request carries that customer's own id. The store is written
    /// at most once and never on a failure path.
    ///
    /// # Errors
    ///
    /// - `PaydeskError::InvalidPhoneNumber` if the number fails validation.
    /// - `PaydeskError::PhoneNumberTaken` if the number is already registered.
    /// - `PaydeskError::InvalidCustomer` if the name is empty.
    /// - `PaydeskError::Storage` on backend failure.
    pub fn register_new_customer(&self, request: CustomerRegistrationRequest) -> Result<Customer> {
        let candidate = request.customer;
        let phone_number = candidate.phone_number.clone();

        if !self.validator.is_valid(&phone_number) {
            tracing::debug!(phone_number = %phone_number, "Rejected invalid phone number");
            return Err(PaydeskError::InvalidPhoneNumber { phone_number });
        }

        if candidate.name.trim().is_empty() {
            tracing::debug!(phone_number = %phone_number, "Rejected customer without a name");
            return Err(PaydeskError::InvalidCustomer("name must not be empty".into()));
        }

        if let Some(existing) = self.customers.find_customer_by_phone(&phone_number)? {
            tracing::info!(
                phone_number = %phone_number,
                existing_id = %existing.id,
                "Phone number already registered"
            );
            return Err(PaydeskError::PhoneNumberTaken { phone_number });
        }

        let customer = candidate.into_customer();
        self.customers.insert_customer(&customer)?;

        tracing::info!(customer_id = %customer.id, "Customer registered");

        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use paydesk_core::{CustomerId, NewCustomer};
    use paydesk_store::StoreError;

    /// Customer store double that records every call.
    #[derive(Default)]
    struct RecordingCustomers {
        by_phone: Option<Customer>,
        // Another registration wins the phone number between lookup and insert.
        lose_insert_race: bool,
        saved: Mutex<Vec<Customer>>,
        lookups: Mutex<u32>,
    }

    impl RecordingCustomers {
        fn with_existing(customer: Customer) -> Self {
            Self {
                by_phone: Some(customer),
                ..Self::default()
            }
        }

        fn losing_insert_race() -> Self {
            Self {
                lose_insert_race: true,
                ..Self::default()
            }
        }

        fn saved(&self) -> Vec<Customer> {
            self.saved.lock().unwrap().clone()
        }

        fn lookups(&self) -> u32 {
            *self.lookups.lock().unwrap()
        }
    }

    impl CustomerStore for RecordingCustomers {
        fn get_customer(&self, _: &CustomerId) -> paydesk_store::Result<Option<Customer>> {
            Ok(None)
        }

        fn find_customer_by_phone(&self, _: &str) -> paydesk_store::Result<Option<Customer>> {
            *self.lookups.lock().unwrap() += 1;
            Ok(self.by_phone.clone())
        }

        fn insert_customer(&self, customer: &Customer) -> paydesk_store::Result<()> {
            if self.lose_insert_race {
                return Err(StoreError::Conflict {
                    entity: "phone number",
                    key: customer.phone_number.clone(),
                });
            }
            self.saved.lock().unwrap().push(customer.clone());
            Ok(())
        }

        fn delete_customer(&self, customer_id: &CustomerId) -> paydesk_store::Result<()> {
            Err(StoreError::NotFound {
                entity: "customer",
                id: customer_id.to_string(),
            })
        }
    }

    fn service(store: &Arc<RecordingCustomers>) -> CustomerRegistrationService {
        CustomerRegistrationService::new(store.clone(), PhoneNumberValidator::default())
    }

    #[test]
    fn saves_new_customer() {
        let store = Arc::new(RecordingCustomers::default());
        let id = CustomerId::generate();
        let request =
            CustomerRegistrationRequest::new(NewCustomer::new(Some(id), "Marian", "+447123456789"));

        let customer = service(&store).register_new_customer(request).unwrap();

        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], customer);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].name, "Marian");
        assert_eq!(saved[0].phone_number, "+447123456789");
    }

    #[test]
    fn generates_id_when_absent() {
        let store = Arc::new(RecordingCustomers::default());
        let request =
            CustomerRegistrationRequest::new(NewCustomer::new(None, "Maryam", "+447000000007"));

        service(&store).register_new_customer(request).unwrap();

        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Maryam");
        assert_eq!(saved[0].phone_number, "+447000000007");
    }

    #[test]
    fn invalid_phone_number_touches_nothing() {
        let store = Arc::new(RecordingCustomers::default());
        let request = CustomerRegistrationRequest::new(NewCustomer::new(
            Some(CustomerId::generate()),
            "Marian",
            "7777",
        ));

        let err = service(&store).register_new_customer(request).unwrap_err();

        assert!(err.to_string().contains("Phone number 7777 is not valid"));
        assert_eq!(store.lookups(), 0);
        assert!(store.saved().is_empty());
    }

    #[test]
    fn empty_name_touches_nothing() {
        for name in ["", "   "] {
            let store = Arc::new(RecordingCustomers::default());
            let request =
                CustomerRegistrationRequest::new(NewCustomer::new(None, name, "+447123456789"));

            let err = service(&store).register_new_customer(request).unwrap_err();

            assert!(matches!(err, PaydeskError::InvalidCustomer(_)));
            assert_eq!(store.lookups(), 0);
            assert!(store.saved().is_empty());
        }
    }

    #[test]
    fn phone_taken_between_lookup_and_insert_is_a_conflict() {
        let store = Arc::new(RecordingCustomers::losing_insert_race());
        let request =
            CustomerRegistrationRequest::new(NewCustomer::new(None, "Harden", "+447000000008"));

        let err = service(&store).register_new_customer(request).unwrap_err();

        assert!(matches!(
            err,
            PaydeskError::PhoneNumberTaken { ref phone_number } if phone_number == "+447000000008"
        ));
        assert!(err.to_string().contains("phone number +447000000008 is taken"));
        assert_eq!(store.lookups(), 1);
        assert!(store.saved().is_empty());
    }

    #[test]
    fn taken_phone_number_is_a_conflict() {
        let existing = NewCustomer::new(None, "Westbrook", "+447000000008").into_customer();
        let store = Arc::new(RecordingCustomers::with_existing(existing));
        let request =
            CustomerRegistrationRequest::new(NewCustomer::new(None, "Harden", "+447000000008"));

        let err = service(&store).register_new_customer(request).unwrap_err();

        assert!(matches!(err, PaydeskError::PhoneNumberTaken { .. }));
        assert!(err.to_string().contains("phone number +447000000008 is taken"));
        assert!(store.saved().is_empty());
    }

    #[test]
    fn resubmitting_the_same_customer_is_a_conflict() {
        let existing = NewCustomer::new(None, "Giannis", "+447000000008").into_customer();
        let store = Arc::new(RecordingCustomers::with_existing(existing.clone()));
        let request = CustomerRegistrationRequest::new(NewCustomer::new(
            Some(existing.id),
            "Giannis",
            "+447000000008",
        ));

        let err = service(&store).register_new_customer(request).unwrap_err();

        assert!(matches!(err, PaydeskError::PhoneNumberTaken { .. }));
        assert!(store.saved().is_empty());
    }
}
