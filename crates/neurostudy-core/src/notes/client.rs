//! Client for the notes endpoint.

use reqwest::Client;
use url::Url;

use super::request::{DetailLevel, NotesRequest, NotesResult};
use crate::error::{CoreError, GatewayError, ValidationError};
use crate::http;
use crate::modes::SupportMode;

pub struct NotesClient {
    http: Client,
    url: Url,
    api_key: Option<String>,
}

impl NotesClient {
    pub fn new(url: Url, api_key: Option<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            http: http::build_client()?,
            url,
            api_key,
        })
    }

    /// Request notes for `content`. Empty content is rejected before any
    /// network call.
    pub async fn generate(
        &self,
        content: &str,
        detail_level: DetailLevel,
        modes: &[SupportMode],
    ) -> Result<NotesResult, CoreError> {
        if content.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "content".into(),
                message: "No content provided".into(),
            }
            .into());
        }

        let request = NotesRequest {
            content,
            detail_level,
            modes,
        };
        tracing::info!(chars = content.len(), level = %detail_level, "requesting notes");

        let builder = self.http.post(self.url.clone()).json(&request);
        let response = http::authorize(builder, self.api_key.as_deref())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = http::check_status(response).await?;

        let result = response
            .json::<NotesResult>()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;
        Ok(result)
    }
}
