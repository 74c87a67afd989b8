//! Construction and wire-format checks for [`Error`].

use super::*;
use rstest::rstest;
use serde_json::json;

fn trace() -> TraceId {
    "3f1c9a2e-7b64-4e0d-9c55-0a8e6f2d4b17".parse().expect("uuid")
}

#[rstest]
#[case(Error::invalid_request(""), ErrorCode::InvalidRequest, "Invalid request")]
#[case(Error::unauthorized(" "), ErrorCode::Unauthorized, "Not authenticated")]
#[case(Error::not_found("\t"), ErrorCode::NotFound, "Not found")]
#[case(Error::internal(String::new()), ErrorCode::InternalError, "Internal server error")]
fn blank_messages_fall_back_per_code(
    #[case] error: Error,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
}

#[tokio::test]
async fn errors_pick_up_the_request_trace_id() {
    let outside = Error::not_found("Incident not found");
    let inside = TraceId::scope(trace(), async { Error::not_found("Incident not found") }).await;

    assert_eq!(outside.trace_id(), None);
    assert_eq!(inside.trace_id(), Some(trace()));
}

#[rstest]
fn payload_uses_camel_case_and_skips_empty_fields() {
    let with_everything = Error::invalid_request("title must not be blank")
        .with_trace_id(trace())
        .with_details(json!({ "field": "title", "code": "blank_title" }));
    let bare = Error::unauthorized("Incorrect username or password");

    assert_eq!(
        serde_json::to_value(&with_everything).expect("serialise"),
        json!({
            "code": "invalid_request",
            "message": "title must not be blank",
            "traceId": "3f1c9a2e-7b64-4e0d-9c55-0a8e6f2d4b17",
            "details": { "field": "title", "code": "blank_title" },
        })
    );
    assert_eq!(
        serde_json::to_value(&bare).expect("serialise"),
        json!({ "code": "unauthorized", "message": "Incorrect username or password" })
    );
}

#[rstest]
#[case(json!({ "code": "not_found", "message": "  " }))]
#[case(json!({ "code": "not_found", "message": "gone", "traceId": "abc" }))]
#[case(json!({ "code": "not_found", "message": "gone", "status": 404 }))]
#[case(json!({ "code": "gone", "message": "gone" }))]
fn malformed_payloads_do_not_decode(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<Error>(payload).is_err());
}

#[tokio::test]
async fn decoding_keeps_only_the_payload_trace_id() {
    let decoded: Error = TraceId::scope(trace(), async {
        serde_json::from_value(json!({ "code": "internal_error", "message": "boom" }))
    })
    .await
    .expect("valid payload");

    assert_eq!(decoded.trace_id(), None);
}
