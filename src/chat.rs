//! Chat reply assembly.
//!
//! Turns extracted signals plus a recommendation into the markdown reply
//! returned by the conversational surface.

use serde::{Deserialize, Serialize};

use crate::models::{ExtractedSignals, RecommendResponse};

/// Demographics assumed when the user did not state them in chat.
pub const DEFAULT_CHAT_AGE: u32 = 25;
pub const DEFAULT_CHAT_GENDER: &str = "other";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Markdown-formatted reply body.
    pub reply: String,
    pub extracted: ExtractedSignals,
    pub disclaimer: String,
}

/// Format a friendly markdown reply around the recommendation.
pub fn build_reply(extracted: ExtractedSignals, rec: &RecommendResponse) -> ChatReply {
    let mut lines: Vec<String> = Vec::new();

    if !extracted.symptoms.is_empty() {
        lines.push(format!(
            "**Detected symptoms:** {}",
            extracted.symptoms.join(", ")
        ));
    }
    if !extracted.lifestyle.is_empty() {
        let cues: Vec<&str> = extracted.lifestyle.iter().map(|l| l.as_str()).collect();
        lines.push(format!("**Lifestyle cues:** {}", cues.join(", ")));
    }
    if lines.is_empty() {
        lines.push(
            "_I couldn't detect specific symptoms. Here are some general suggestions._".to_string(),
        );
    }

    lines.push("\n### Suggestions".to_string());
    for s in &rec.suggestions {
        let how = if s.how_to_use.is_empty() {
            String::new()
        } else {
            format!(" • **How:** {}", s.how_to_use)
        };
        let avoid = if s.avoid_with.is_empty() {
            String::new()
        } else {
            format!(" • **Avoid with:** {}", s.avoid_with.join(", "))
        };
        lines.push(format!("- **{}** — **Why:** {}{}{}", s.name, s.why, how, avoid));
    }

    lines.push("\n### Tips".to_string());
    for tip in &rec.tips {
        lines.push(format!("- {tip}"));
    }

    lines.push(format!("\n> {}", rec.disclaimer));

    ChatReply {
        reply: lines.join("\n"),
        extracted,
        disclaimer: rec.disclaimer.clone(),
    }
}
