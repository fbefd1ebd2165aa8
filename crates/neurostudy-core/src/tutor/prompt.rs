//! Tutor system prompt and greeting.
//!
//! The mode blocks below are the one definition of how each support mode
//! changes the tutor's writing style. The greeting and the gateway request
//! are both built from this module.

use indoc::indoc;
use serde::{Deserialize, Serialize};

use crate::modes::SupportMode;

pub const PREAMBLE: &str = "You are NeuroStudy AI Tutor, a helpful and patient educational assistant that adapts to different learning needs.\n\n";

const DYSLEXIA_BLOCK: &str = indoc! {r#"
    DYSLEXIA ADAPTATIONS (CRITICAL - FOLLOW STRICTLY):
    - Use SHORT sentences only (max 8-10 words each)
    - Break everything into bullet points
    - Use simple, common words only
    - Never write paragraphs longer than 2 sentences
    - Add extra line breaks between ideas
    - Use concrete examples, not abstract concepts
    - If explaining a concept, use an analogy first
"#};

const ADHD_BLOCK: &str = indoc! {r#"
    ADHD ADAPTATIONS (CRITICAL - FOLLOW STRICTLY):
    - Start with the KEY TAKEAWAY in the first line
    - Keep total response under 150 words
    - Use action words: "Do this:", "Try this:", "Here's how:"
    - Add a motivating phrase at the end
    - Break into numbered steps (max 5 steps)
    - End with: "🎯 NEXT ACTION: [specific thing to do right now]"
"#};

const SENSORY_SAFE_BLOCK: &str = indoc! {r#"
    SENSORY-SAFE ADAPTATIONS:
    - Use calm, neutral language throughout
    - Avoid exclamation marks and ALL CAPS
    - Keep tone gentle and steady
    - No overwhelming lists (max 4 items)
    - Minimal emoji use (max 1-2 per response)
"#};

const DYSCALCULIA_BLOCK: &str = indoc! {r#"
    DYSCALCULIA ADAPTATIONS:
    - Break math into VERY small steps (one operation per step)
    - Label each step clearly: "Step 1:", "Step 2:", etc.
    - Use visual spacing around numbers
    - Show all work - never skip steps
    - Use concrete examples before abstract math
    - Avoid mental math - write everything out
"#};

const AUTISM_BLOCK: &str = indoc! {r#"
    AUTISM ADAPTATIONS:
    - Be LITERAL and precise - no idioms or metaphors
    - Use consistent formatting every response
    - State expectations explicitly
    - Avoid ambiguous language
    - If asked a yes/no question, answer yes or no first, then explain
"#};

const GENERAL_GUIDELINES: &str = indoc! {"
    GENERAL GUIDELINES:
    - Be encouraging and never condescending
    - Meet the student where they are
    - If you don't know something, say so honestly
    - Praise effort, not just correct answers
"};

/// Blocks in the order they appear in the prompt. Motor difficulties and
/// chronic fatigue do not change the tutor's writing.
const MODE_BLOCKS: [(SupportMode, &str); 5] = [
    (SupportMode::Dyslexia, DYSLEXIA_BLOCK),
    (SupportMode::Adhd, ADHD_BLOCK),
    (SupportMode::SensorySafe, SENSORY_SAFE_BLOCK),
    (SupportMode::Dyscalculia, DYSCALCULIA_BLOCK),
    (SupportMode::Autism, AUTISM_BLOCK),
];

/// The chapter the student is reading, sent along with tutor requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterContext {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl From<&crate::curriculum::Chapter> for ChapterContext {
    fn from(chapter: &crate::curriculum::Chapter) -> Self {
        Self {
            title: chapter.title.clone(),
            summary: chapter.summary.clone().unwrap_or_default(),
            key_points: chapter.key_points.clone(),
        }
    }
}

/// Instruction block for `mode`, if it has one.
pub fn mode_block(mode: SupportMode) -> Option<&'static str> {
    MODE_BLOCKS
        .iter()
        .find(|(m, _)| *m == mode)
        .map(|(_, block)| *block)
}

pub fn build_system_prompt(modes: &[SupportMode], chapter: Option<&ChapterContext>) -> String {
    let mut prompt = String::from(PREAMBLE);

    for (mode, block) in MODE_BLOCKS {
        if modes.contains(&mode) {
            prompt.push('\n');
            prompt.push_str(block);
        }
    }

    if let Some(ctx) = chapter {
        prompt.push_str("\n\nCURRENT CHAPTER CONTEXT:\n");
        prompt.push_str(&format!("Title: {}\n", ctx.title));
        prompt.push_str(&format!("Summary: {}\n", ctx.summary));
        prompt.push_str(&format!("Key Points: {}\n", ctx.key_points.join(", ")));
        prompt.push_str("\nUse this context to provide relevant help.");
    }

    prompt.push_str("\n\n");
    prompt.push_str(GENERAL_GUIDELINES);
    prompt
}

/// Opening assistant message for a new chat.
pub fn greeting(modes: &[SupportMode], chapter: Option<&ChapterContext>) -> String {
    let mut text = if modes.contains(&SupportMode::Dyslexia) {
        "Hi! I'm here to help.\n\nI'll use:\n• Short sentences\n• Simple words\n• Clear explanations\n\nWhat would you like to learn?".to_string()
    } else if modes.contains(&SupportMode::Adhd) {
        "Hey! 👋 Ready to learn?\n\nI'll keep things short and actionable.\n\n🎯 What topic do you want to tackle?".to_string()
    } else if modes.contains(&SupportMode::SensorySafe) {
        "Hello. I'm your study assistant. I'm here to help at your own pace. What would you like to explore?".to_string()
    } else {
        "Hi! I'm your AI tutor. How can I help you today?".to_string()
    };

    if let Some(ctx) = chapter {
        text.push_str(&format!(
            "\n\nI can see you're studying \"{}\". Feel free to ask me anything about this chapter!",
            ctx.title
        ));
    }
    text
}
