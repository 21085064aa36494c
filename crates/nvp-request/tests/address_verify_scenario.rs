//! # AddressVerify End-to-End Scenario
//!
//! Drives an `AddressVerify` request through its full lifecycle: validated
//! construction, hand-off to a transport, and reading the attached
//! response. The transport here is canned; it stands in for the HTTPS
//! collaborator and answers the way the remote API does for a matching
//! address.

use std::sync::Once;

use nvp_core::{NvpError, NvpMap, ValidationError};
use nvp_request::{execute, AddressVerify, Request, Transport, TransportError};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Answers every call with a fixed response.
struct Canned(NvpMap);

impl Transport for Canned {
    fn call(&self, fields: &NvpMap) -> Result<NvpMap, TransportError> {
        if fields.get("METHOD") != Some("AddressVerify") {
            return Err(TransportError::Malformed {
                reason: "unexpected method".to_string(),
            });
        }
        Ok(self.0.clone())
    }
}

fn matching_address_response() -> NvpMap {
    NvpMap::from([("ACK", "Success"), ("STREET-MATCH", "Y"), ("ZIP-MATCH", "Y")])
}

#[test]
fn construct_send_and_read_response() {
    init_tracing();

    let mut request =
        AddressVerify::new(Some("user@example.com"), Some("123 Main St"), Some("90210"))
            .expect("valid arguments");
    assert_eq!(
        request.nvp_request(),
        NvpMap::from([
            ("METHOD", "AddressVerify"),
            ("EMAIL", "user@example.com"),
            ("STREET", "123 Main St"),
            ("ZIP", "90210"),
        ])
    );
    assert!(request.nvp_response().is_empty());

    execute(&Canned(matching_address_response()), &mut request).expect("canned call succeeds");

    assert_eq!(request.nvp_response(), matching_address_response());
}

#[test]
fn setter_used_directly_by_transport() {
    init_tracing();

    let mut request =
        AddressVerify::new(Some("user@example.com"), Some("123 Main St"), Some("90210")).unwrap();
    request.set_nvp_response(matching_address_response());

    let mut first = request.nvp_response();
    first.insert("ZIP-MATCH", "N");
    assert_eq!(request.nvp_response(), matching_address_response());
}

#[test]
fn invalid_input_never_reaches_transport() {
    init_tracing();

    let result = AddressVerify::new(Some("user@example.com"), Some("123 Main St!"), Some("90210"));
    let err = result.unwrap_err();
    assert_eq!(err.field(), "STREET");

    let top: NvpError = err.into();
    assert!(top.to_string().starts_with("validation error"));
}

#[test]
fn each_rule_yields_a_distinct_error() {
    let email = "user@example.com";
    let long_email = format!("{}@example.com", "a".repeat(244));
    let errors = [
        AddressVerify::new(Some("not-an-email"), Some("1 Main"), Some("1")).unwrap_err(),
        AddressVerify::new(Some(&long_email), Some("1 Main"), Some("1")).unwrap_err(),
        AddressVerify::new(Some(email), None, Some("1")).unwrap_err(),
        AddressVerify::new(Some(email), Some(&"a".repeat(36)), Some("1")).unwrap_err(),
        AddressVerify::new(Some(email), Some("123 Main St!"), Some("1")).unwrap_err(),
        AddressVerify::new(Some(email), Some("1 Main"), None).unwrap_err(),
        AddressVerify::new(Some(email), Some("1 Main"), Some(&"9".repeat(17))).unwrap_err(),
    ];

    assert!(matches!(errors[0], ValidationError::Malformed { field: "EMAIL", .. }));
    assert!(matches!(errors[1], ValidationError::TooLong { field: "EMAIL", actual: 256, .. }));
    assert!(matches!(errors[2], ValidationError::Missing { field: "STREET" }));
    assert!(matches!(errors[3], ValidationError::TooLong { field: "STREET", .. }));
    assert!(matches!(errors[4], ValidationError::Malformed { field: "STREET", .. }));
    assert!(matches!(errors[5], ValidationError::Missing { field: "ZIP" }));
    assert!(matches!(errors[6], ValidationError::TooLong { field: "ZIP", .. }));

    for (i, a) in errors.iter().enumerate() {
        for b in &errors[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn response_round_trips_through_json() {
    let mut request =
        AddressVerify::new(Some("user@example.com"), Some("123 Main St"), Some("90210")).unwrap();
    let body = serde_json::json!({"ACK": "Success", "ZIP-MATCH": "Y"}).to_string();
    request.set_nvp_response(NvpMap::from_json(&body).unwrap());
    assert_eq!(request.nvp_response().get("ZIP-MATCH"), Some("Y"));
}
