//! Contract tests for the Gemini REST client against a mock server.

use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::{json, Value};
use solarframe_gui_lib::ai::gemini::{DEFAULT_EDIT_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL};
use solarframe_gui_lib::ai::{AiError, EncodedImage, GeminiClient, GeminiConfig, GenerativeBackend};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        GeminiConfig::new(API_KEY)
            .with_base_url(server.uri())
            .with_poll_interval(Duration::ZERO),
    )
}

fn png() -> EncodedImage {
    EncodedImage {
        mime_type: "image/png".to_string(),
        data: "iVBORw0KGgo=".to_string(),
    }
}

async fn request_body(server: &MockServer, index: usize) -> Value {
    let requests = server.received_requests().await.unwrap_or_default();
    serde_json::from_slice(&requests[index].body).unwrap()
}

// ── Video ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_video_polls_until_done_and_signs_uri() {
    let server = MockServer::start().await;
    let video_uri = format!("{}/files/clip:download?alt=media", server.uri());

    Mock::given(method("POST"))
        .and(path(format!("/models/{DEFAULT_VIDEO_MODEL}:predictLongRunning")))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "operations/op-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/op-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "operations/op-1", "done": false })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/op-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/op-1",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [{ "video": { "uri": video_uri } }]
                }
            }
        })))
        .mount(&server)
        .await;

    let url = client(&server).generate_video("spin the case", None).await.unwrap();
    assert_eq!(url, format!("{video_uri}&key={API_KEY}"));

    let body = request_body(&server, 0).await;
    assert_eq!(body["instances"][0]["prompt"], "spin the case");
    assert!(body["instances"][0].get("image").is_none());
    assert_eq!(body["parameters"]["aspectRatio"], "16:9");
    assert_eq!(body["parameters"]["resolution"], "720p");

    // One POST and two polls
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 3);
}

#[tokio::test]
async fn test_video_sends_reference_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/op-2",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [{ "video": { "uri": "https://files.example/v.mp4" } }]
                }
            }
        })))
        .mount(&server)
        .await;

    let image = png();
    client(&server).generate_video("animate", Some(&image)).await.unwrap();

    let body = request_body(&server, 0).await;
    assert_eq!(body["instances"][0]["image"]["bytesBase64Encoded"], image.data);
    assert_eq!(body["instances"][0]["image"]["mimeType"], "image/png");
}

#[tokio::test]
async fn test_video_operation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "operations/op-3" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/op-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "done": true,
            "error": { "code": 8, "message": "Resource exhausted" }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate_video("x", None).await.unwrap_err();
    assert_matches!(err, AiError::Operation(msg) if msg == "Resource exhausted");
}

#[tokio::test]
async fn test_video_done_without_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/op-4",
            "done": true,
            "response": { "generateVideoResponse": { "generatedSamples": [] } }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate_video("x", None).await.unwrap_err();
    assert_matches!(err, AiError::EmptyPayload(_));
}

// ── Image ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_image_returns_data_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{DEFAULT_IMAGE_MODEL}:predict")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": "QUJD", "mimeType": "image/jpeg" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = client(&server).generate_image("a solar case").await.unwrap();
    assert_eq!(uri, "data:image/jpeg;base64,QUJD");

    let body = request_body(&server, 0).await;
    assert_eq!(body["instances"][0]["prompt"], "a solar case");
    assert_eq!(body["parameters"]["aspectRatio"], "1:1");
    assert_eq!(body["parameters"]["sampleCount"], 1);
}

#[tokio::test]
async fn test_image_without_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client(&server).generate_image("x").await.unwrap_err();
    assert_matches!(err, AiError::EmptyPayload("no image generated"));
}

// ── Edit ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_edit_takes_last_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{DEFAULT_EDIT_MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "Rmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/webp", "data": "TGFzdA==" } }
                    ]
                }
            }]
        })))
        .mount(&server)
        .await;

    let image = png();
    let uri = client(&server).edit_image(&image, "make it blue").await.unwrap();
    assert_eq!(uri, "data:image/webp;base64,TGFzdA==");

    let body = request_body(&server, 0).await;
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], image.data);
    assert_eq!(parts[1]["text"], "make it blue");
}

#[tokio::test]
async fn test_edit_text_only_reply_is_empty_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot do that" }] } }]
        })))
        .mount(&server)
        .await;

    let err = client(&server).edit_image(&png(), "x").await.unwrap_err();
    assert_matches!(err, AiError::EmptyPayload(_));
}

// ── Analyze ───────────────────────────────────────────────────

#[tokio::test]
async fn test_analyze_concatenates_text_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Panels are " }, { "text": "aligned." }] } }]
        })))
        .mount(&server)
        .await;

    let text = client(&server).analyze("check the panels").await.unwrap();
    assert_eq!(text, "Panels are aligned.");
}

#[tokio::test]
async fn test_analyze_without_candidates_is_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    assert_eq!(client(&server).analyze("x").await.unwrap(), "");
}

// ── Errors ────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_error_message_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate_image("x").await.unwrap_err();
    assert_matches!(err, AiError::Api { status: 403, message } if message == "API key not valid");
}

#[tokio::test]
async fn test_api_error_without_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).analyze("x").await.unwrap_err();
    assert_matches!(err, AiError::Api { status: 500, message } if message == "Internal Server Error");
}

// ── Through the panel ─────────────────────────────────────────

#[tokio::test]
async fn test_panel_submission_reaches_backend_once() {
    use shared::{AiArtifact, AiMode};
    use solarframe_gui_lib::state::ai_panel::AiPanelState;
    use std::sync::Arc;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{DEFAULT_IMAGE_MODEL}:predict")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": "QUJD" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut panel = AiPanelState::default();
    panel.mode = AiMode::Image;
    panel.prompt = "  product shot  ".to_string();
    panel
        .submit(&tokio::runtime::Handle::current(), Arc::new(client(&server)))
        .unwrap();
    assert!(panel.wait().await);

    assert_eq!(
        panel.result().map(|r| &r.artifact),
        Some(&AiArtifact::ImageDataUri("data:image/jpeg;base64,QUJD".to_string()))
    );
    assert_eq!(request_body(&server, 0).await["instances"][0]["prompt"], "product shot");
}
