//! Tests for the Razorpay client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real provider connection.

use medibook_core::{BookingError, OrderRequest, PaymentProvider};
use medibook_payments::{PaymentError, RazorpayClient, RazorpayConfig, SignatureVerifier};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// "rzp_test_key:rzp_test_secret" in base64
const BASIC_AUTH: &str = "Basic cnpwX3Rlc3Rfa2V5OnJ6cF90ZXN0X3NlY3JldA==";

fn client_for(server: &MockServer) -> RazorpayClient {
    RazorpayClient::new(
        RazorpayConfig::new("rzp_test_key", "rzp_test_secret").with_api_base(server.uri()),
    )
    .expect("valid config")
}

fn order_json(id: &str, receipt: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "entity": "order",
        "amount": 50000,
        "amount_paid": 0,
        "amount_due": 50000,
        "currency": "INR",
        "receipt": receipt,
        "status": status,
        "attempts": 0,
        "notes": [],
        "created_at": 1_704_873_600
    })
}

// =============================================================================
// Order Creation Tests
// =============================================================================

mod create_order {
    use super::*;

    #[tokio::test]
    async fn test_create_order_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(header("authorization", BASIC_AUTH))
            .and(body_json(serde_json::json!({
                "amount": 50000,
                "currency": "INR",
                "receipt": "appt-1"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(order_json("order_abc", "appt-1", "created")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let order = client
            .create_order(&OrderRequest {
                amount: 50000,
                currency: "INR".to_string(),
                receipt: "appt-1".to_string(),
            })
            .await
            .expect("order should be created");

        assert_eq!(order.id, "order_abc");
        assert_eq!(order.amount, 50000);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.receipt.as_deref(), Some("appt-1"));
        assert_eq!(order.status, "created");
    }

    #[tokio::test]
    async fn test_create_order_bad_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": "BAD_REQUEST_ERROR",
                    "description": "The amount must be atleast INR 1.00"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client
            .create(&OrderRequest {
                amount: 0,
                currency: "INR".to_string(),
                receipt: "appt-1".to_string(),
            })
            .await;

        match result.unwrap_err() {
            PaymentError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("BAD_REQUEST_ERROR"));
                assert!(message.contains("amount"));
            }
            e => panic!("Expected Api error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_order_auth_failure_maps_to_provider_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client
            .create_order(&OrderRequest {
                amount: 50000,
                currency: "INR".to_string(),
                receipt: "appt-1".to_string(),
            })
            .await;

        match result.unwrap_err() {
            BookingError::Provider(msg) => assert!(msg.contains("401")),
            e => panic!("Expected Provider error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_order_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client
            .create(&OrderRequest {
                amount: 50000,
                currency: "INR".to_string(),
                receipt: "appt-1".to_string(),
            })
            .await;

        match result.unwrap_err() {
            PaymentError::Parse(_) => {}
            e => panic!("Expected Parse error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let client = RazorpayClient::new(
            RazorpayConfig::new("rzp_test_key", "rzp_test_secret")
                .with_api_base("http://127.0.0.1:1"),
        )
        .unwrap();

        let result = client
            .create(&OrderRequest {
                amount: 50000,
                currency: "INR".to_string(),
                receipt: "appt-1".to_string(),
            })
            .await;

        match result.unwrap_err() {
            PaymentError::Unreachable(_) | PaymentError::Request(_) => {}
            e => panic!("Expected Unreachable or Request error, got: {:?}", e),
        }
    }
}

// =============================================================================
// Order Fetch Tests
// =============================================================================

mod fetch_order {
    use super::*;

    #[tokio::test]
    async fn test_fetch_order_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/order_abc"))
            .and(header("authorization", BASIC_AUTH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(order_json("order_abc", "appt-1", "paid")),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let order = client.fetch_order("order_abc").await.unwrap();

        assert_eq!(order.id, "order_abc");
        assert_eq!(order.receipt.as_deref(), Some("appt-1"));
        assert_eq!(order.status, "paid");
    }

    #[tokio::test]
    async fn test_fetch_order_without_receipt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/order_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "order_abc",
                "amount": 50000,
                "currency": "INR",
                "receipt": null,
                "status": "created"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let order = client.fetch("order_abc").await.unwrap();
        assert!(order.receipt.is_none());
    }

    #[tokio::test]
    async fn test_fetch_unknown_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/order_missing"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": "BAD_REQUEST_ERROR",
                    "description": "The id provided does not exist"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        match client.fetch("order_missing").await.unwrap_err() {
            PaymentError::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("does not exist"));
            }
            e => panic!("Expected Api error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_fetch_escapes_order_id() {
        let mock_server = MockServer::start().await;

        // A crafted id must stay a single path segment
        Mock::given(method("GET"))
            .and(path("/v1/orders/a%2Fb"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(order_json("a/b", "appt-1", "created")),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let order = client.fetch("a/b").await.unwrap();
        assert_eq!(order.id, "a/b");
    }
}

// =============================================================================
// Signature Tests
// =============================================================================

mod signatures {
    use super::*;

    #[test]
    fn test_checkout_signature_roundtrip() {
        let config = RazorpayConfig::new("rzp_test_key", "rzp_test_secret");
        let verifier = SignatureVerifier::new(&config.key_secret);

        let signature = verifier.sign("order_abc", "pay_xyz").unwrap();
        verifier
            .verify("order_abc", "pay_xyz", &signature)
            .expect("valid signature");

        let err: BookingError = verifier
            .verify("order_abc", "pay_other", &signature)
            .unwrap_err()
            .into();
        assert!(matches!(err, BookingError::InvalidSignature));
    }
}
