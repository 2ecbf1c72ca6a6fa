//! Common test utilities for paydesk integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use paydesk_service::{
    create_router, AppState, CardCharger, CardPaymentCharge, ChargeError, ChargeRequest,
    ServiceConfig,
};
use paydesk_store::MemoryStore;

/// Charger that answers every charge with a fixed outcome and counts calls.
pub struct FixedCharger {
    card_debited: bool,
    calls: AtomicUsize,
}

impl FixedCharger {
    pub fn new(card_debited: bool) -> Self {
        Self {
            card_debited,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CardCharger for FixedCharger {
    async fn charge_card(&self, _: &ChargeRequest) -> Result<CardPaymentCharge, ChargeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CardPaymentCharge::new(self.card_debited))
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The charger behind the payment workflow.
    pub charger: Arc<FixedCharger>,
}

impl TestHarness {
    /// Create a harness whose charger debits every card.
    pub fn new() -> Self {
        Self::with_charger(FixedCharger::new(true))
    }

    /// Create a harness with a specific charger outcome.
    pub fn with_charger(charger: FixedCharger) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let charger = Arc::new(charger);
        let state = AppState::with_charger(Arc::new(MemoryStore::new()), charger.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, charger }
    }

    /// Register a customer and return the response body.
    pub async fn register(&self, name: &str, phone_number: &str) -> Value {
        let response = self
            .server
            .put("/api/v1/customer-registration")
            .json(&json!({
                "customer": {
                    "name": name,
                    "phoneNumber": phone_number
                }
            }))
            .await;
        response.assert_status_ok();
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
