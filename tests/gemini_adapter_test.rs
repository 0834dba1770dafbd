//! Integration tests for the Gemini analyzer against a mock HTTP server

use glossa::adapters::vision::{GeminiAnalyzer, VisionAnalyzer};
use glossa::config::{secret_string, AnalysisConfig};
use glossa::domain::{HealthStatus, Language, ServiceError};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};

const PATH: &str = "/v1beta/models/gemini-test:generateContent";
const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

fn analyzer(server: &ServerGuard) -> GeminiAnalyzer {
    let config = AnalysisConfig {
        base_url: server.url(),
        model: "gemini-test".to_string(),
        api_key: Some(secret_string("mock-key".to_string())),
        timeout_seconds: 5,
    };
    GeminiAnalyzer::new(&config).unwrap()
}

/// Wrap report text the way `generateContent` returns it
fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn report_json(status: &str) -> Value {
    json!({
        "hemoglobinEstimate": "12.5 g/dL",
        "healthStatus": status,
        "observations": ["pale tongue", "thin white coating"],
        "recommendations": ["iron-rich diet"],
        "description": "Mild pallor"
    })
}

#[tokio::test]
async fn test_analyze_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "mock-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"parts": [{"inlineData": {"mimeType": "image/jpeg", "data": "/9j/4A=="}}]}],
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(&report_json("Fair").to_string()))
        .create_async()
        .await;

    let before = chrono::Utc::now();
    let report = analyzer(&server).analyze(&JPEG, Language::En).await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.hemoglobin_estimate(), "12.5 g/dL");
    assert_eq!(report.health_status(), HealthStatus::Fair);
    assert_eq!(report.observations().len(), 2);
    assert_eq!(report.description(), "Mild pallor");
    assert!(report.timestamp() >= before);
}

#[tokio::test]
async fn test_analyze_sends_requested_language() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::Regex("Output language MUST be Hindi".to_string()))
        .with_status(200)
        .with_body(envelope(&report_json("Good").to_string()))
        .create_async()
        .await;

    let report = analyzer(&server).analyze(&JPEG, Language::Hi).await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.health_status(), HealthStatus::Good);
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let mut server = Server::new_async().await;
    let mut partial = report_json("Good");
    partial.as_object_mut().unwrap().remove("description");
    partial.as_object_mut().unwrap().remove("recommendations");

    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(envelope(&partial.to_string()))
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    match err {
        ServiceError::MissingFields(fields) => {
            assert!(fields.contains(&"description".to_string()));
            assert!(fields.contains(&"recommendations".to_string()));
        }
        other => panic!("expected MissingFields, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_status_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(envelope(&report_json("Critical").to_string()))
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::UnknownHealthStatus(s) if s == "Critical"));
}

#[tokio::test]
async fn test_server_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::ServerError { status: 500, .. }));
}

#[tokio::test]
async fn test_rate_limit_is_server_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(429)
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::ServerError { status: 429, .. }));
}

#[tokio::test]
async fn test_client_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(400)
        .with_body(r#"{"error": {"message": "API key not valid"}}"#)
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    match err {
        ServiceError::ClientError { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected ClientError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidates() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::EmptyResponse);
}

#[tokio::test]
async fn test_non_json_report_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(envelope("Your tongue looks healthy!"))
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidResponse(m) if m.contains("failed to parse")));
}

#[tokio::test]
async fn test_non_json_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = analyzer(&server)
        .analyze(&JPEG, Language::En)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let config = AnalysisConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        model: "gemini-test".to_string(),
        api_key: Some(secret_string("mock-key".to_string())),
        timeout_seconds: 5,
    };
    let analyzer = GeminiAnalyzer::new(&config).unwrap();

    let err = analyzer.analyze(&JPEG, Language::En).await.unwrap_err();

    assert!(matches!(
        err,
        ServiceError::ConnectionFailed(_) | ServiceError::Timeout(_)
    ));
}
