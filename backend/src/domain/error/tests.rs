//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::malformed_request("bad body"), ErrorCode::MalformedRequest)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn shorthand_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn constructor_captures_scoped_trace_id(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn decoding_ignores_ambient_trace_id(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let payload = json!({"code": "not_found", "message": "missing"});
    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("valid error payload")
    })
    .await;
    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::malformed_request("expected value at line 1 column 1")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"line": 1}));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "malformed_request",
            "message": "expected value at line 1 column 1",
            "traceId": TRACE_ID,
            "details": {"line": 1},
        })
    );

    let bare = serde_json::to_value(Error::internal("boom")).expect("serialise error");
    assert!(bare.get("traceId").is_none());
    assert!(bare.get("details").is_none());
}

#[rstest]
fn decoding_rejects_blank_message() {
    let result = serde_json::from_value::<Error>(json!({"code": "not_found", "message": ""}));
    assert!(result.is_err());
}

#[rstest]
fn decoding_accepts_snake_case_trace_id() {
    let error: Error = serde_json::from_value(json!({
        "code": "internal_error",
        "message": "boom",
        "trace_id": TRACE_ID,
    }))
    .expect("valid error payload");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
