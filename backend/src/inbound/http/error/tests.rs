//! Tests for HTTP error rendering.

use super::*;
use crate::domain::{DELETION_CONFLICT, Error};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn leaking_internal_error() -> Error {
    Error::internal("pool exhausted while writing order lines")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"row": 7}))
}

async fn render(error: &Error) -> (StatusCode, actix_web::http::header::HeaderMap, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error envelope deserialises");
    (status, headers, body)
}

#[rstest]
#[case(Error::invalid_request("price must not be negative"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("food item not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict(DELETION_CONFLICT), StatusCode::CONFLICT)]
#[case(Error::conflict("user already exists"), StatusCode::CONFLICT)]
#[case(
    Error::service_unavailable("catalog unavailable, retry later"),
    StatusCode::SERVICE_UNAVAILABLE
)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_has_one_status(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
    assert_eq!(status_for(err.code()), status);
}

#[rstest]
#[actix_web::test]
async fn outages_ask_clients_to_retry() {
    let error = Error::service_unavailable("catalog unavailable, retry later");

    let (status, headers, body) = render(&error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let retry = headers
        .get(RETRY_AFTER)
        .expect("Retry-After is set on 503")
        .to_str()
        .expect("ASCII header");
    assert_eq!(retry, RETRY_AFTER_SECONDS.to_string());
    assert_eq!(body, error);
}

#[rstest]
#[actix_web::test]
async fn deletion_conflicts_keep_their_message_without_retry_hint() {
    let (status, headers, body) = render(&Error::conflict(DELETION_CONFLICT)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(headers.get(RETRY_AFTER).is_none());
    assert!(headers.get(TRACE_ID_HEADER).is_none());
    assert_eq!(body.message(), DELETION_CONFLICT);
    assert_eq!(body.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_masked_but_traceable(leaking_internal_error: Error) {
    let (status, headers, body) = render(&leaking_internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let header = headers
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ASCII header");
    assert_eq!(header, TRACE_ID);
    assert_eq!(body.code(), ErrorCode::InternalError);
    assert_eq!(body.message(), INTERNAL_MESSAGE);
    assert_eq!(body.trace_id(), Some(TRACE_ID));
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_details_reach_the_client() {
    let error = Error::invalid_request("minPrice must be a decimal number")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "minPrice", "code": "invalid_number"}));

    let (status, _, body) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error);
}

#[rstest]
fn only_internal_errors_are_rewritten(leaking_internal_error: Error) {
    let unavailable = Error::service_unavailable("orders unavailable, retry later");
    assert!(matches!(public_body(&unavailable), Cow::Borrowed(_)));

    let masked = public_body(&leaking_internal_error).into_owned();
    assert_eq!(masked, Error::internal(INTERNAL_MESSAGE).with_trace_id(TRACE_ID));
}

#[rstest]
fn framework_errors_become_generic_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("malformed JSON at line 3").into();

    assert_eq!(err, Error::internal(INTERNAL_MESSAGE));
}
