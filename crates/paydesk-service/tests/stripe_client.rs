//! Stripe client tests against a mock Stripe API.

use paydesk_core::{Amount, Currency};
use paydesk_service::{CardCharger, ChargeRequest, StripeClient, StripeError};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "sk_test_paydesk";

fn request(amount: rust_decimal::Decimal, currency: Currency) -> ChargeRequest {
    ChargeRequest {
        source: "tok_visa".into(),
        amount: Amount::new(amount).unwrap(),
        currency,
        description: "Donation".into(),
    }
}

#[tokio::test]
async fn charge_is_form_encoded_in_minor_units() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .and(basic_auth(API_KEY, ""))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("amount=10000"))
        .and(body_string_contains("currency=gbp"))
        .and(body_string_contains("source=tok_visa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ch_123",
            "amount": 10000,
            "currency": "gbp",
            "paid": true,
            "status": "succeeded"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StripeClient::new(API_KEY, server.uri()).unwrap();
    let charge = client
        .create_charge(&request(dec!(100.00), Currency::Gbp))
        .await
        .unwrap();

    assert_eq!(charge.id, "ch_123");
    assert!(charge.paid);
}

#[tokio::test]
async fn paid_flag_drives_card_debited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ch_456",
            "paid": false,
            "status": "failed",
            "failure_message": "insufficient funds"
        })))
        .mount(&server)
        .await;

    let client = StripeClient::new(API_KEY, server.uri()).unwrap();
    let charge = client
        .charge_card(&request(dec!(5.00), Currency::Usd))
        .await
        .unwrap();

    assert!(!charge.card_debited);
}

#[tokio::test]
async fn card_decline_is_not_debited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error": {
                "type": "card_error",
                "code": "card_declined",
                "message": "Your card was declined."
            }
        })))
        .mount(&server)
        .await;

    let client = StripeClient::new(API_KEY, server.uri()).unwrap();
    let charge = client
        .charge_card(&request(dec!(5.00), Currency::Usd))
        .await
        .unwrap();

    assert!(!charge.card_debited);
}

#[tokio::test]
async fn api_error_is_a_charge_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "Invalid API Key provided"
            }
        })))
        .mount(&server)
        .await;

    let client = StripeClient::new(API_KEY, server.uri()).unwrap();

    let err = client
        .create_charge(&request(dec!(5.00), Currency::Usd))
        .await
        .unwrap_err();
    assert!(matches!(err, StripeError::Api { ref error_type, .. } if error_type == "invalid_request_error"));

    let err = client
        .charge_card(&request(dec!(5.00), Currency::Usd))
        .await
        .unwrap_err();
    assert_eq!(err.provider, "stripe");
    assert!(err.message.contains("Invalid API Key provided"));
}

#[tokio::test]
async fn unparseable_error_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = StripeClient::new(API_KEY, server.uri()).unwrap();
    let err = client
        .create_charge(&request(dec!(5.00), Currency::Usd))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn sub_minor_unit_amount_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = StripeClient::new(API_KEY, server.uri()).unwrap();
    let err = client
        .create_charge(&request(dec!(1.005), Currency::Usd))
        .await
        .unwrap_err();

    assert!(matches!(err, StripeError::InvalidAmount { .. }));
}
