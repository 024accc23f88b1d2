//! Keyword heuristic for spotting meeting requests.
//!
//! Used when no language-model classifier is available. A message counts as a
//! request when it mentions a meeting keyword and either asks a question or
//! refers to time.

use std::sync::LazyLock;

use regex::Regex;

pub const MEETING_KEYWORDS: &[&str] = &[
    "meeting",
    "schedule",
    "call",
    "sync",
    "catch up",
    "chat",
    "discuss",
    "available",
    "free time",
];

static TIME_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(time|when|schedule|available|free)\b").expect("static regex is valid")
});

pub fn is_meeting_request(subject: &str, body: &str) -> bool {
    let text = format!("{} {}", subject, body).to_lowercase();

    let has_keyword = MEETING_KEYWORDS.iter().any(|k| text.contains(k));
    let has_question = text.contains('?');
    let has_time_reference = TIME_REFERENCE.is_match(&text);

    has_keyword && (has_question || has_time_reference)
}
