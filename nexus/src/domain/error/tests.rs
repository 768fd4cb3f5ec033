//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::unauthorized("no"), ErrorCode::Unauthorized)]
#[case(Error::service_unavailable("offline"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(ErrorCode::Unauthorized, "unauthorized")]
#[case(ErrorCode::ServiceUnavailable, "service_unavailable")]
#[case(ErrorCode::InternalError, "internal_error")]
fn codes_serialize_in_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(serde_json::to_value(code).expect("code serializes"), json!(expected));
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::Unauthorized, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn only_transport_failures_are_retryable() {
    assert!(Error::service_unavailable("offline").is_retryable());
    assert!(!Error::unauthorized("no").is_retryable());
    assert!(!Error::internal("boom").is_retryable());
}

#[rstest]
fn serializes_code_in_snake_case_and_skips_missing_details() {
    let value =
        serde_json::to_value(Error::service_unavailable("offline")).expect("error serializes");
    assert_eq!(value, json!({ "code": "service_unavailable", "message": "offline" }));
}

#[rstest]
fn serializes_attached_details() {
    let error = Error::internal("boom").with_details(json!({ "key": "networkNexus_user" }));
    let value = serde_json::to_value(&error).expect("error serializes");
    assert_eq!(value["details"]["key"], "networkNexus_user");
    assert_eq!(error.to_string(), "boom");
}
