//! Integration tests for the notes client against a mock gateway.

use neurostudy_core::error::{CoreError, GatewayError};
use neurostudy_core::modes::SupportMode;
use neurostudy_core::notes::{DetailLevel, NotesClient};
use neurostudy_core::storage::GatewayConfig;

fn client_for(server: &mockito::Server) -> NotesClient {
    let gateway = GatewayConfig {
        base_url: server.url(),
        ..Default::default()
    };
    NotesClient::new(gateway.notes_url().unwrap(), Some("key".into())).unwrap()
}

async fn gateway_error(status: usize, body: &str) -> GatewayError {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/functions/v1/summarize-notes")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    match client_for(&server)
        .generate("Some notes", DetailLevel::Standard, &[])
        .await
    {
        Err(CoreError::Gateway(e)) => e,
        other => panic!("expected gateway error, got {other:?}"),
    }
}

/// Test: a successful response is decoded into sections.
#[tokio::test]
async fn test_generate_notes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/functions/v1/summarize-notes")
        .match_header("authorization", "Bearer key")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "content": "Plants make food from sunlight.",
            "detailLevel": "brief",
            "modes": ["adhd"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"summary":"Photosynthesis.","notes":{"keyPoints":["Light"],"mainThemes":["Energy"],"importantDetails":[],"actionItems":[]}}"#,
        )
        .create_async()
        .await;

    let result = client_for(&server)
        .generate(
            "Plants make food from sunlight.",
            DetailLevel::Brief,
            &[SupportMode::Adhd],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.summary, "Photosynthesis.");
    assert_eq!(result.notes.key_points, vec!["Light"]);
    assert_eq!(result.sections().len(), 2);
}

/// Test: each failure status maps to its own error and message.
#[tokio::test]
async fn test_status_codes_map_to_distinct_errors() {
    let rate = gateway_error(429, r#"{"error":"Rate limit exceeded. Please try again later."}"#).await;
    assert!(matches!(rate, GatewayError::RateLimited { .. }));
    assert_eq!(rate.user_message(), "Rate limit exceeded. Please try again later.");

    let credits = gateway_error(402, r#"{"error":"API credits exhausted. Please add credits to continue."}"#).await;
    assert!(matches!(credits, GatewayError::QuotaExhausted { .. }));

    let large = gateway_error(413, r#"{"error":"too big"}"#).await;
    assert!(matches!(large, GatewayError::PayloadTooLarge { .. }));

    let other = gateway_error(500, r#"{"error":"boom"}"#).await;
    assert_eq!(other.user_message(), "boom");
}

/// Test: a provider 400 about token limits is reported as too large.
#[tokio::test]
async fn test_token_limit_400_is_payload_too_large() {
    let err = gateway_error(400, r#"{"error":"The input token count exceeds the maximum"}"#).await;
    assert!(matches!(err, GatewayError::PayloadTooLarge { .. }));
}

/// Test: empty content never reaches the network.
#[tokio::test]
async fn test_empty_content_is_rejected_locally() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/functions/v1/summarize-notes")
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("  \n ", DetailLevel::Standard, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    mock.assert_async().await;
}

/// Test: a body that is not notes JSON is a parse error.
#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/functions/v1/summarize-notes")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("text", DetailLevel::Standard, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Gateway(GatewayError::Parse(_))));
}
