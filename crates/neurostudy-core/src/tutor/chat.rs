//! One tutor conversation.
//!
//! A turn goes `begin_turn` -> `push_delta`* -> `finish_turn` or `fail_turn`.
//! Only one turn may be in flight. On failure the partial reply is dropped
//! and a single error message takes its place.

use serde::{Deserialize, Serialize};

use super::client::{TutorClient, TutorRequest};
use super::prompt::{greeting, ChapterContext};
use crate::error::{GatewayError, ValidationError};
use crate::modes::SupportMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied,
    Failed(GatewayError),
}

pub fn error_reply(err: &GatewayError) -> String {
    format!(
        "Sorry, I encountered an issue: {}. Please try again.",
        err.user_message()
    )
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    modes: Vec<SupportMode>,
    chapter: Option<ChapterContext>,
    messages: Vec<ChatMessage>,
    /// Index of the assistant message being streamed.
    pending: Option<usize>,
    in_flight: bool,
}

impl ChatSession {
    /// Start a conversation seeded with the mode-aware greeting.
    pub fn new(modes: Vec<SupportMode>, chapter: Option<ChapterContext>) -> Self {
        let hello = greeting(&modes, chapter.as_ref());
        Self {
            modes,
            chapter,
            messages: vec![ChatMessage::assistant(hello)],
            pending: None,
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn modes(&self) -> &[SupportMode] {
        &self.modes
    }

    pub fn chapter(&self) -> Option<&ChapterContext> {
        self.chapter.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Append the user's message and return the history to send.
    pub fn begin_turn(&mut self, text: &str) -> Result<Vec<ChatMessage>, ValidationError> {
        if self.in_flight {
            return Err(ValidationError::TurnInProgress);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        self.messages.push(ChatMessage::user(text));
        self.in_flight = true;
        Ok(self.messages.clone())
    }

    pub fn push_delta(&mut self, delta: &str) {
        if !self.in_flight {
            return;
        }
        match self.pending {
            Some(i) => self.messages[i].content.push_str(delta),
            None => {
                self.messages.push(ChatMessage::assistant(delta));
                self.pending = Some(self.messages.len() - 1);
            }
        }
    }

    pub fn finish_turn(&mut self) {
        self.pending = None;
        self.in_flight = false;
    }

    pub fn fail_turn(&mut self, err: &GatewayError) {
        if let Some(i) = self.pending.take() {
            self.messages.truncate(i);
        }
        self.messages.push(ChatMessage::assistant(error_reply(err)));
        self.in_flight = false;
    }

    /// Run a full turn against `client`, forwarding deltas to `on_delta`.
    ///
    /// Gateway failures are recorded in the transcript and reported through
    /// [`TurnOutcome::Failed`]; only a rejected message is an `Err`.
    pub async fn send<F>(
        &mut self,
        client: &TutorClient,
        text: &str,
        mut on_delta: F,
    ) -> Result<TurnOutcome, ValidationError>
    where
        F: FnMut(&str),
    {
        let history = self.begin_turn(text)?;
        let modes = self.modes.clone();
        let chapter = self.chapter.clone();
        let request = TutorRequest {
            messages: &history,
            modes: &modes,
            chapter_context: chapter.as_ref(),
        };

        let result = client
            .stream_reply(&request, |delta| {
                self.push_delta(delta);
                on_delta(delta);
            })
            .await;

        match result {
            Ok(_) => {
                self.finish_turn();
                Ok(TurnOutcome::Replied)
            }
            Err(e) => {
                tracing::warn!(error = %e, "tutor turn failed");
                self.fail_turn(&e);
                Ok(TurnOutcome::Failed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let chat = ChatSession::new(vec![SupportMode::Adhd], None);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Assistant);
        assert!(chat.messages()[0].content.starts_with("Hey!"));
    }

    #[test]
    fn streams_into_one_assistant_message() {
        let mut chat = ChatSession::new(vec![], None);
        let history = chat.begin_turn("  What is photosynthesis? ").unwrap();
        assert_eq!(history.last().unwrap(), &ChatMessage::user("What is photosynthesis?"));

        chat.push_delta("Plants ");
        chat.push_delta("make food.");
        chat.finish_turn();

        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[2], ChatMessage::assistant("Plants make food."));
        assert!(!chat.is_in_flight());
    }

    #[test]
    fn rejects_empty_and_concurrent_turns() {
        let mut chat = ChatSession::new(vec![], None);
        assert_eq!(chat.begin_turn("   "), Err(ValidationError::EmptyMessage));
        chat.begin_turn("first").unwrap();
        assert_eq!(chat.begin_turn("second"), Err(ValidationError::TurnInProgress));
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn failure_replaces_partial_reply_with_one_error() {
        let mut chat = ChatSession::new(vec![], None);
        chat.begin_turn("Explain fractions").unwrap();
        chat.push_delta("A fraction is");

        let err = GatewayError::Stream("connection reset".into());
        chat.fail_turn(&err);

        let msgs = chat.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1], ChatMessage::user("Explain fractions"));
        assert_eq!(msgs[2].content, error_reply(&err));
        assert!(msgs[2].content.starts_with("Sorry, I encountered an issue: "));
        assert!(!chat.is_in_flight());
    }

    #[test]
    fn failure_before_any_delta_keeps_history() {
        let mut chat = ChatSession::new(vec![], None);
        chat.begin_turn("hello").unwrap();
        chat.fail_turn(&GatewayError::from_status(429, None));
        assert_eq!(chat.messages().len(), 3);
        assert!(chat.messages()[2].content.contains("Rate limit exceeded"));
    }

    #[test]
    fn deltas_outside_a_turn_are_ignored() {
        let mut chat = ChatSession::new(vec![], None);
        chat.push_delta("stray");
        assert_eq!(chat.messages().len(), 1);
    }
}
