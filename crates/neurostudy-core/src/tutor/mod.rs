//! AI tutor: mode-aware prompt, streaming client and chat state.

mod chat;
mod client;
mod gateway;
mod prompt;
mod sse;

pub use chat::{error_reply, ChatMessage, ChatSession, Role, TurnOutcome};
pub use client::{TutorClient, TutorRequest};
pub use gateway::{completion_request, CompletionRequest, PromptMessage, PromptRole, TUTOR_MODEL};
pub use prompt::{build_system_prompt, greeting, mode_block, ChapterContext, PREAMBLE};
pub use sse::{SseDecoder, SseEvent};
