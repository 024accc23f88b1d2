//! Draft reply text listing the proposed slots.

use chrono_tz::Tz;

use crate::confirm::LinkedSlot;
use crate::scanner::CandidateSlot;

const GREETING: &str = "Happy to find a time to connect. Please select a slot below.";
const CLOSING: &str = "If none of these work, feel free to suggest different times.";

/// The same reply as plain text and as HTML with clickable links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftReply {
    pub plain: String,
    pub html: String,
}

/// e.g. `"Mon, Mar 16, 9:00 AM EDT"`.
pub fn format_slot_time(slot: &CandidateSlot, tz: Tz) -> String {
    slot.start
        .with_timezone(&tz)
        .format("%a, %b %-d, %-I:%M %p %Z")
        .to_string()
}

pub fn draft_reply(slots: &[LinkedSlot], tz: Tz) -> DraftReply {
    let plain_lines: Vec<String> = slots
        .iter()
        .enumerate()
        .map(|(i, linked)| {
            format!(
                "{}. {} - Click here to confirm: {}",
                i + 1,
                format_slot_time(&linked.slot, tz),
                linked.confirm_link
            )
        })
        .collect();

    let html_lines: Vec<String> = slots
        .iter()
        .enumerate()
        .map(|(i, linked)| {
            format!(
                "{}. {} - <a href=\"{}\">Click here to confirm</a>",
                i + 1,
                format_slot_time(&linked.slot, tz),
                escape_attr(&linked.confirm_link)
            )
        })
        .collect();

    DraftReply {
        plain: format!("{}\n\n{}\n\n{}", GREETING, plain_lines.join("\n"), CLOSING),
        html: format!(
            "{}<br><br>{}<br><br>{}",
            GREETING,
            html_lines.join("<br>"),
            CLOSING
        ),
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
