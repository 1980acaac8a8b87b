use gemini_client::{GeminiClient, GeminiError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 4,
            "totalTokenCount": 16
        }
    })
}

async fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-key").with_base_url(server.uri())
}

#[tokio::test]
async fn generate_text_returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-pro:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Flood report")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let text = client.generate_text("write a report").await.unwrap();

    assert_eq!(text, "Flood report");
}

#[tokio::test]
async fn generate_json_sets_response_mime_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-pro:generateContent"))
        .and(wiremock::matchers::body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("{\"a\":1}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let text = client.generate_json("give me json").await.unwrap();

    assert_eq!(text, "{\"a\":1}");
}

#[tokio::test]
async fn server_error_is_transient_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded", "status": "UNAVAILABLE" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.generate_text("hi").await.unwrap_err();

    match &err {
        GeminiError::Api { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "The model is overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn blocked_prompt_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.generate_text("hi").await.unwrap_err();

    assert!(matches!(err, GeminiError::EmptyResponse(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let client = GeminiClient::new("k").with_base_url("http://127.0.0.1:9");
    let err = client.generate_text("hi").await.unwrap_err();

    assert!(matches!(err, GeminiError::Network(_)));
    assert!(!err.to_string().contains("127.0.0.1:9"));
}
