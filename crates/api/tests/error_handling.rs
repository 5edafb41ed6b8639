//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests do NOT need an HTTP server -- they call `IntoResponse`
//! directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;
use valuables_api::error::AppError;
use valuables_core::error::CoreError;
use valuables_db::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "item",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "item not found"}));
}

// ---------------------------------------------------------------------------
// Test: identifier and format errors map to 400 without echoing input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_identifier_returns_400() {
    let err = AppError::Core(CoreError::InvalidIdentifier("abc".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "invalid item ID"}));
}

#[tokio::test]
async fn invalid_format_returns_400_without_parser_detail() {
    let err = AppError::Core(CoreError::InvalidFormat(
        "expected value at line 1 column 2".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "invalid request format"}));
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with ordered details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400_with_details() {
    let err = AppError::Core(CoreError::Validation(vec![
        "name is required".into(),
        "purchase_price must be >= 0".into(),
    ]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "error": "validation failed",
            "details": ["name is required", "purchase_price must be >= 0"]
        })
    );
}

// ---------------------------------------------------------------------------
// Test: storage errors map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_error_returns_500_and_sanitizes_message() {
    let err = AppError::store("failed to update item")(StoreError::InvalidData(
        "secret database credentials leaked".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "failed to update item"}));
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn core_errors_convert_with_question_mark() {
    fn fails() -> Result<(), AppError> {
        let parsed: Result<(), CoreError> = Err(CoreError::InvalidIdentifier("0".into()));
        parsed?;
        Ok(())
    }

    let (status, _) = error_to_response(fails().unwrap_err()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
