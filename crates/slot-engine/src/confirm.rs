//! Confirmation tokens and links for proposed slots.
//!
//! A token is the standard base64 encoding of a JSON [`ConfirmationRequest`]:
//! everything the confirmation page needs to book the slot without a server
//! round trip. Tokens are not signed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::scanner::CandidateSlot;

/// What a recipient confirms by following a slot's link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub slot: CandidateSlot,
    /// Identifier of the email thread the proposal replies to.
    pub email_id: String,
    pub sender: String,
    pub issued_at: DateTime<Utc>,
}

/// A proposed slot paired with its confirmation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedSlot {
    #[serde(flatten)]
    pub slot: CandidateSlot,
    pub confirm_link: String,
}

impl ConfirmationRequest {
    pub fn new(
        slot: CandidateSlot,
        email_id: impl Into<String>,
        sender: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            slot,
            email_id: email_id.into(),
            sender: sender.into(),
            issued_at,
        }
    }

    /// The calendar event to create once the recipient confirms.
    pub fn to_event_draft(&self, tz: Tz) -> EventDraft {
        let time_zone = tz.name().to_string();
        EventDraft {
            summary: format!("Meeting with {}", self.sender),
            description: format!(
                "Scheduled via meeting scheduler\nOriginal email: {}",
                self.email_id
            ),
            start: DraftTime {
                date_time: self.slot.start.with_timezone(&tz).to_rfc3339(),
                time_zone: time_zone.clone(),
            },
            end: DraftTime {
                date_time: self.slot.end.with_timezone(&tz).to_rfc3339(),
                time_zone,
            },
            attendees: vec![DraftAttendee {
                email: self.sender.clone(),
            }],
            reminders: DraftReminders {
                use_default: false,
                overrides: vec![
                    ReminderOverride {
                        method: "email".to_string(),
                        minutes: 24 * 60,
                    },
                    ReminderOverride {
                        method: "popup".to_string(),
                        minutes: 10,
                    },
                ],
            },
        }
    }
}

/// Calendar insert body, in Google Calendar's field naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub summary: String,
    pub description: String,
    pub start: DraftTime,
    pub end: DraftTime,
    pub attendees: Vec<DraftAttendee>,
    pub reminders: DraftReminders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAttendee {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

pub fn encode_token(request: &ConfirmationRequest) -> Result<String> {
    let json = serde_json::to_vec(request)?;
    Ok(STANDARD.encode(json))
}

/// # Errors
/// Returns `SlotError::InvalidToken` if the token is not base64 or does not
/// hold a confirmation request.
pub fn decode_token(token: &str) -> Result<ConfirmationRequest> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| SlotError::InvalidToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SlotError::InvalidToken(e.to_string()))
}

/// `base_url` with the url-encoded token appended as the `token` parameter.
pub fn confirmation_link(base_url: &str, token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", base_url, separator, urlencoding::encode(token))
}

/// Attach a confirmation link to each slot.
pub fn link_slots(
    slots: &[CandidateSlot],
    base_url: &str,
    email_id: &str,
    sender: &str,
    issued_at: DateTime<Utc>,
) -> Result<Vec<LinkedSlot>> {
    slots
        .iter()
        .map(|slot| {
            let request = ConfirmationRequest::new(slot.clone(), email_id, sender, issued_at);
            let token = encode_token(&request)?;
            Ok(LinkedSlot {
                slot: slot.clone(),
                confirm_link: confirmation_link(base_url, &token),
            })
        })
        .collect()
}
