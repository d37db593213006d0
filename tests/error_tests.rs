// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use translate_gateway::error::GatewayError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::Config("bad port".to_string()),
        GatewayError::InvalidRequest("Bad request".to_string()),
        GatewayError::PayloadTooLarge("length limit exceeded".to_string()),
        GatewayError::Internal("boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_invalid_request_is_400() {
    let error = GatewayError::InvalidRequest("Invalid JSON body".to_string());
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert!(format!("{}", error).contains("Invalid JSON body"));
}

#[test]
fn test_payload_too_large_is_413() {
    let error = GatewayError::PayloadTooLarge("length limit exceeded".to_string());
    assert_eq!(error.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn test_other_errors_are_500() {
    assert_eq!(
        GatewayError::Config("bad port".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        GatewayError::Internal("boom".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_config_error_conversion() {
    let config_err = config::ConfigError::Message("missing key".to_string());
    let error: GatewayError = config_err.into();
    assert!(matches!(error, GatewayError::ConfigParsing(_)));
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_carries_code() {
    let response = GatewayError::InvalidRequest("missing field".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], 400);
    assert!(json["message"].as_str().unwrap().contains("missing field"));
}
