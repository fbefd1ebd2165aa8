//! Notes prompt construction and model-response parsing.
//!
//! `notes_completion_request` is the body the notes gateway sends to the
//! model provider; `neurostudy notes upstream` prints it for a file.

use serde::Serialize;

use super::request::{DetailLevel, NotesResult, Notes};
use crate::modes::SupportMode;

pub const MAX_INPUT_CHARS: usize = 350_000;
pub const TRUNCATION_MARKER: &str = "\n\n[... content truncated due to size ...]\n\n";
pub const NOTES_MODEL: &str = "google/gemini-2.5-flash";
pub const NOTES_TEMPERATURE: f32 = 0.3;
pub const UNPARSED_NOTES: &str = "Unable to parse structured notes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub text: String,
    pub truncated: bool,
    pub original_len: usize,
}

/// Trim `raw` and, if it is still longer than [`MAX_INPUT_CHARS`], keep the
/// head (70 % of the budget) and the tail around a marker.
pub fn truncate_for_model(raw: &str) -> Truncated {
    let trimmed = raw.trim();
    let original_len = trimmed.chars().count();
    if original_len <= MAX_INPUT_CHARS {
        return Truncated {
            text: trimmed.to_string(),
            truncated: false,
            original_len,
        };
    }

    let budget = MAX_INPUT_CHARS.saturating_sub(TRUNCATION_MARKER.chars().count());
    let head = budget * 7 / 10;
    let tail = budget - head;

    let mut text: String = trimmed.chars().take(head).collect();
    text.push_str(TRUNCATION_MARKER);
    text.extend(trimmed.chars().skip(original_len - tail));

    Truncated {
        text,
        truncated: true,
        original_len,
    }
}

/// First match wins: dyslexia, then ADHD, then sensory-safe.
pub fn style_instructions(modes: &[SupportMode]) -> &'static str {
    if modes.contains(&SupportMode::Dyslexia) {
        "Use short sentences. Simple words. Add extra line breaks between points. Use bullet points extensively."
    } else if modes.contains(&SupportMode::Adhd) {
        "Be concise and action-oriented. Use bold for key points. Include a \"Quick Start\" section at the top."
    } else if modes.contains(&SupportMode::SensorySafe) {
        "Use calm, neutral language. Avoid exclamation marks or urgent phrasing."
    } else {
        ""
    }
}

pub fn detail_instructions(level: DetailLevel) -> &'static str {
    match level {
        DetailLevel::Brief => {
            "Keep the summary to 1 paragraph. Notes should have only 3-5 key points total."
        }
        DetailLevel::Standard => {
            "Provide a balanced summary (2-3 paragraphs). Notes should have 5-7 points per section."
        }
        DetailLevel::Comprehensive => {
            "Provide an extensive summary (3-4 paragraphs). Notes should be very detailed with 10+ points per section."
        }
    }
}

pub fn build_notes_prompt(modes: &[SupportMode], level: DetailLevel) -> String {
    format!(
        r#"You are an expert note-taker and summarizer. {style}

{detail}

You must respond with valid JSON in this exact format:
{{
  "summary": "A concise summary of the content",
  "notes": {{
    "keyPoints": ["point 1", "point 2"],
    "mainThemes": ["theme 1", "theme 2"],
    "importantDetails": ["detail 1", "detail 2"],
    "actionItems": ["action 1", "action 2"]
  }}
}}

If there are no action items, return an empty array for actionItems.

If the provided content is clearly an excerpt (truncated), mention this briefly in the summary."#,
        style = style_instructions(modes),
        detail = detail_instructions(level),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct NotesMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotesCompletionRequest {
    pub model: String,
    pub messages: Vec<NotesMessage>,
    pub temperature: f32,
}

/// Upstream request for the notes gateway. `None` when there is no content.
pub fn notes_completion_request(
    content: &str,
    modes: &[SupportMode],
    level: DetailLevel,
) -> Option<NotesCompletionRequest> {
    if content.trim().is_empty() {
        return None;
    }
    let safe = truncate_for_model(content);
    if safe.truncated {
        tracing::info!(
            from = safe.original_len,
            to = safe.text.chars().count(),
            "notes input truncated"
        );
    }

    let mut user = String::from("Please summarize and create notes from the following content.\n");
    if safe.truncated {
        user.push_str("NOTE: The content was truncated due to size. Summarize based on the excerpt and mention it's partial.\n\n");
    } else {
        user.push('\n');
    }
    user.push_str(&safe.text);

    Some(NotesCompletionRequest {
        model: NOTES_MODEL.to_string(),
        messages: vec![
            NotesMessage {
                role: "system",
                content: build_notes_prompt(modes, level),
            },
            NotesMessage {
                role: "user",
                content: user,
            },
        ],
        temperature: NOTES_TEMPERATURE,
    })
}

/// Body of the first ``` fenced block (optionally tagged `json`), if closed.
fn fenced_block(raw: &str) -> Option<&str> {
    let start = raw.find("```")? + 3;
    let rest = &raw[start..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Parse the model's reply into notes. Never fails: unparseable text becomes
/// the summary.
pub fn parse_notes_response(raw: &str) -> NotesResult {
    let candidate = fenced_block(raw).unwrap_or_else(|| raw.trim());
    match serde_json::from_str::<NotesResult>(candidate) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "model reply was not structured notes");
            NotesResult {
                summary: raw.to_string(),
                notes: Notes {
                    key_points: vec![UNPARSED_NOTES.to_string()],
                    ..Default::default()
                },
            }
        }
    }
}

/// Providers report an oversized prompt as a 400 with one of these phrases.
pub fn is_token_limit_error(status: u16, body: &str) -> bool {
    if status != 400 {
        return false;
    }
    let body = body.to_lowercase();
    body.contains("token count exceeds") || body.contains("maximum number of tokens")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_only_trimmed() {
        let t = truncate_for_model("  hello  ");
        assert_eq!(t.text, "hello");
        assert!(!t.truncated);
        assert_eq!(t.original_len, 5);
    }

    #[test]
    fn long_input_keeps_head_and_tail() {
        let raw = format!("{}{}", "a".repeat(300_000), "z".repeat(100_000));
        let t = truncate_for_model(&raw);
        assert!(t.truncated);
        assert_eq!(t.original_len, 400_000);
        assert_eq!(t.text.chars().count(), MAX_INPUT_CHARS);
        assert!(t.text.starts_with('a'));
        assert!(t.text.ends_with('z'));
        assert!(t.text.contains(TRUNCATION_MARKER));

        let budget = MAX_INPUT_CHARS - TRUNCATION_MARKER.chars().count();
        let head = t.text.find(TRUNCATION_MARKER).unwrap();
        assert_eq!(head, budget * 7 / 10);
    }

    #[test]
    fn style_precedence() {
        assert!(style_instructions(&[SupportMode::Adhd, SupportMode::Dyslexia]).starts_with("Use short sentences"));
        assert!(style_instructions(&[SupportMode::SensorySafe, SupportMode::Adhd]).contains("Quick Start"));
        assert_eq!(style_instructions(&[SupportMode::Autism]), "");
    }

    #[test]
    fn prompt_contains_detail_and_schema() {
        let prompt = build_notes_prompt(&[], DetailLevel::Brief);
        assert!(prompt.starts_with("You are an expert note-taker and summarizer. \n\nKeep the summary to 1 paragraph."));
        assert!(prompt.contains("\"keyPoints\": [\"point 1\", \"point 2\"]"));
    }

    #[test]
    fn completion_request_marks_truncation() {
        assert!(notes_completion_request("   ", &[], DetailLevel::Standard).is_none());

        let req = notes_completion_request("short", &[], DetailLevel::Standard).unwrap();
        assert_eq!(req.messages[1].content, "Please summarize and create notes from the following content.\n\nshort");

        let big = "x".repeat(MAX_INPUT_CHARS + 10);
        let req = notes_completion_request(&big, &[], DetailLevel::Standard).unwrap();
        assert!(req.messages[1].content.contains("NOTE: The content was truncated"));
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "Here you go:\n```json\n{\"summary\":\"S\",\"notes\":{\"keyPoints\":[\"k\"],\"mainThemes\":[],\"importantDetails\":[],\"actionItems\":[]}}\n```";
        let result = parse_notes_response(raw);
        assert_eq!(result.summary, "S");
        assert_eq!(result.notes.key_points, vec!["k"]);
    }

    #[test]
    fn parses_bare_json() {
        let result = parse_notes_response(r#"{"summary":"Plain","notes":{}}"#);
        assert_eq!(result.summary, "Plain");
    }

    #[test]
    fn falls_back_on_prose() {
        let result = parse_notes_response("Just some prose.");
        assert_eq!(result.summary, "Just some prose.");
        assert_eq!(result.notes.key_points, vec![UNPARSED_NOTES]);
        assert!(result.notes.main_themes.is_empty());
    }

    #[test]
    fn detects_token_limit() {
        assert!(is_token_limit_error(400, "The input Token Count Exceeds the limit"));
        assert!(is_token_limit_error(400, "maximum number of tokens allowed"));
        assert!(!is_token_limit_error(500, "token count exceeds"));
        assert!(!is_token_limit_error(400, "bad request"));
    }
}
