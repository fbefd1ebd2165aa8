//! Upstream completion request built by the tutor gateway.
//!
//! The gateway prepends the mode-aware system prompt to the conversation and
//! forwards it to the model provider with streaming enabled. `neurostudy
//! tutor upstream` prints this body for a question without sending it.

use serde::Serialize;

use super::chat::{ChatMessage, Role};
use super::prompt::{build_system_prompt, ChapterContext};
use crate::modes::SupportMode;

pub const TUTOR_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

impl From<Role> for PromptRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => PromptRole::User,
            Role::Assistant => PromptRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub stream: bool,
}

pub fn completion_request(
    modes: &[SupportMode],
    chapter: Option<&ChapterContext>,
    history: &[ChatMessage],
) -> CompletionRequest {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(PromptMessage {
        role: PromptRole::System,
        content: build_system_prompt(modes, chapter),
    });
    messages.extend(history.iter().map(|m| PromptMessage {
        role: m.role.into(),
        content: m.content.clone(),
    }));

    CompletionRequest {
        model: TUTOR_MODEL.to_string(),
        messages,
        stream: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_leads_the_history() {
        let history = vec![
            ChatMessage::assistant("Hi! I'm your AI tutor. How can I help you today?"),
            ChatMessage::user("What is a rational number?"),
        ];
        let req = completion_request(&[SupportMode::Adhd], None, &history);

        assert_eq!(req.model, TUTOR_MODEL);
        assert!(req.stream);
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, PromptRole::System);
        assert!(req.messages[0].content.contains("ADHD ADAPTATIONS"));
        assert_eq!(req.messages[2].content, "What is a rational number?");
    }

    #[test]
    fn serializes_lowercase_roles() {
        let req = completion_request(&[], None, &[ChatMessage::user("hi")]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["stream"], true);
    }
}
