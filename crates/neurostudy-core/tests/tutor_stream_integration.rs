//! Integration tests for the streaming tutor client against a mock gateway.

use neurostudy_core::error::GatewayError;
use neurostudy_core::modes::SupportMode;
use neurostudy_core::storage::GatewayConfig;
use neurostudy_core::tutor::{ChapterContext, ChatSession, Role, TurnOutcome, TutorClient};

fn sse_line(text: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({ "choices": [{ "delta": { "content": text } }] })
    )
}

fn client_for(server: &mockito::Server, key: Option<&str>) -> TutorClient {
    let gateway = GatewayConfig {
        base_url: server.url(),
        ..Default::default()
    };
    TutorClient::new(gateway.tutor_url().unwrap(), key.map(str::to_string)).unwrap()
}

/// Test: a streamed reply is assembled into one assistant message.
#[tokio::test]
async fn test_streamed_reply_builds_one_message() {
    let mut server = mockito::Server::new_async().await;
    let body = format!(
        ": ping\n\n{}{}{}data: [DONE]\n\n",
        sse_line("Step 1: "),
        sse_line("add the "),
        sse_line("numerators.")
    );
    let mock = server
        .mock("POST", "/functions/v1/ai-tutor")
        .match_header("authorization", "Bearer test-key")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "modes": ["dyscalculia"],
            "chapterContext": { "title": "Rational Numbers" }
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let chapter = ChapterContext {
        title: "Rational Numbers".into(),
        summary: "Numbers of the form p/q.".into(),
        key_points: vec!["q is not zero".into()],
    };
    let mut chat = ChatSession::new(vec![SupportMode::Dyscalculia], Some(chapter));

    let mut seen = Vec::new();
    let outcome = chat
        .send(&client, "How do I add fractions?", |d| seen.push(d.to_string()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(outcome, TurnOutcome::Replied);
    assert_eq!(seen.len(), 3);
    let last = chat.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "Step 1: add the numerators.");
    assert_eq!(chat.messages().len(), 3);
    assert!(!chat.is_in_flight());
}

/// Test: a 429 leaves the user message and exactly one error reply.
#[tokio::test]
async fn test_rate_limit_becomes_single_error_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/functions/v1/ai-tutor")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Rate limit exceeded. Please try again in a moment."}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let mut chat = ChatSession::new(vec![], None);
    let outcome = chat.send(&client, "hello", |_| {}).await.unwrap();

    assert!(matches!(
        outcome,
        TurnOutcome::Failed(GatewayError::RateLimited { .. })
    ));
    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(
        messages[2].content,
        "Sorry, I encountered an issue: Rate limit exceeded. Please try again in a moment.. Please try again."
    );
}

/// Test: a server error without a JSON body maps to the unavailable variant.
#[tokio::test]
async fn test_server_error_without_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/functions/v1/ai-tutor")
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let client = client_for(&server, None);
    let mut chat = ChatSession::new(vec![], None);
    let outcome = chat.send(&client, "hello", |_| {}).await.unwrap();

    assert!(matches!(
        outcome,
        TurnOutcome::Failed(GatewayError::Unavailable { status: 500, message: None })
    ));
    assert!(chat.messages()[2]
        .content
        .contains("AI service temporarily unavailable"));
}

/// Test: the stream ends without [DONE]; whatever arrived is kept.
#[tokio::test]
async fn test_stream_without_done_marker() {
    let mut server = mockito::Server::new_async().await;
    let body = format!("{}data: {{\"choices\":[{{\"delta\":{{\"content\":\"tail\"}}}}]}}", sse_line("head "));
    server
        .mock("POST", "/functions/v1/ai-tutor")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let mut chat = ChatSession::new(vec![], None);
    chat.send(&client, "go", |_| {}).await.unwrap();
    assert_eq!(chat.messages().last().unwrap().content, "head tail");
}

/// Test: an empty message is rejected before any request is made.
#[tokio::test]
async fn test_empty_message_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/functions/v1/ai-tutor")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let mut chat = ChatSession::new(vec![], None);
    assert!(chat.send(&client, "   ", |_| {}).await.is_err());
    mock.assert_async().await;
    assert_eq!(chat.messages().len(), 1);
}
