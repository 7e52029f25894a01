//! Tests for the error envelope rendered by `ResponseError`.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case::missing(SearchError::missing_parameter("searchString"))]
#[case::range(SearchError::out_of_range("numItems", 1, 100))]
#[case::empty(SearchError::EmptyResultSet)]
#[case::unavailable(SearchError::UpstreamUnavailable)]
#[case::malformed(SearchError::MalformedUpstreamResponse)]
#[actix_web::test]
async fn every_error_is_a_200_with_only_an_error_field(#[case] error: SearchError) {
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body()).await.expect("body bytes");
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value, json!({ "error": error.to_string() }));
}

#[test]
fn error_response_copies_the_display_text() {
    let payload = ErrorResponse::from(&SearchError::EmptyResultSet);
    assert_eq!(payload.error, "No items matched the given search string");
}

#[actix_web::test]
async fn trace_scope_does_not_leak_into_the_payload() {
    let trace_id = TraceId::generate();
    let response = TraceId::scope(trace_id, async {
        assert_eq!(TraceId::current(), Some(trace_id));
        SearchError::UpstreamUnavailable.error_response()
    })
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body()).await.expect("body bytes");
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        value,
        json!({ "error": "Marketplace search is currently unavailable" })
    );
}
