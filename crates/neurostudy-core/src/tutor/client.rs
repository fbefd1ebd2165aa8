//! Streaming client for the tutor endpoint.

use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use super::chat::ChatMessage;
use super::prompt::ChapterContext;
use super::sse::{SseDecoder, SseEvent};
use crate::error::GatewayError;
use crate::http;
use crate::modes::SupportMode;

/// Body sent to the tutor endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub modes: &'a [SupportMode],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_context: Option<&'a ChapterContext>,
}

pub struct TutorClient {
    http: Client,
    url: Url,
    api_key: Option<String>,
}

impl TutorClient {
    pub fn new(url: Url, api_key: Option<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            http: http::build_client()?,
            url,
            api_key,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send a turn and stream the reply, calling `on_delta` for each piece
    /// of text as it arrives. Returns the full reply.
    pub async fn stream_reply<F>(
        &self,
        request: &TutorRequest<'_>,
        mut on_delta: F,
    ) -> Result<String, GatewayError>
    where
        F: FnMut(&str),
    {
        tracing::debug!(url = %self.url, messages = request.messages.len(), "sending tutor request");

        let builder = self.http.post(self.url.clone()).json(request);
        let response = http::authorize(builder, self.api_key.as_deref())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = http::check_status(response).await?;

        let mut decoder = SseDecoder::new();
        let mut reply = String::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| GatewayError::Stream(e.to_string()))?;
            for event in decoder.push(&bytes) {
                if let SseEvent::Delta(text) = event {
                    on_delta(&text);
                    reply.push_str(&text);
                }
            }
            if decoder.is_done() {
                break;
            }
        }
        for event in decoder.finish() {
            if let SseEvent::Delta(text) = event {
                on_delta(&text);
                reply.push_str(&text);
            }
        }

        tracing::debug!(chars = reply.len(), "tutor reply complete");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case_and_omits_missing_chapter() {
        let messages = vec![ChatMessage::user("hi")];
        let modes = vec![SupportMode::Dyslexia];
        let req = TutorRequest {
            messages: &messages,
            modes: &modes,
            chapter_context: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["modes"][0], "dyslexia");
        assert!(json.get("chapterContext").is_none());

        let ctx = ChapterContext {
            title: "Resources".into(),
            ..Default::default()
        };
        let req = TutorRequest {
            chapter_context: Some(&ctx),
            ..req
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["chapterContext"]["title"], "Resources");
    }
}
