//! WASM bindings for slot-engine.
//!
//! Exposes the availability scan, diverse selection and confirmation links to
//! a browser extension via `wasm-bindgen`. All complex types are passed as
//! JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir extension/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::confirm::{self, LinkedSlot};
use slot_engine::{CalendarEvent, CandidateSlot, WorkingHoursPolicy};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: u32,
    hour_of_day: u32,
    day_index: i64,
}

impl From<&CandidateSlot> for SlotDto {
    fn from(s: &CandidateSlot) -> Self {
        Self {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            duration_minutes: s.duration_minutes,
            hour_of_day: s.hour_of_day,
            day_index: s.day_index,
        }
    }
}

impl SlotDto {
    fn into_slot(self) -> Result<CandidateSlot, JsValue> {
        Ok(CandidateSlot {
            start: parse_datetime(&self.start)?,
            end: parse_datetime(&self.end)?,
            duration_minutes: self.duration_minutes,
            hour_of_day: self.hour_of_day,
            day_index: self.day_index,
        })
    }
}

#[derive(Serialize)]
struct LinkedSlotDto {
    #[serde(flatten)]
    slot: SlotDto,
    confirm_link: String,
}

impl From<&LinkedSlot> for LinkedSlotDto {
    fn from(l: &LinkedSlot) -> Self {
        Self {
            slot: SlotDto::from(&l.slot),
            confirm_link: l.confirm_link.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 and naive datetimes, which are interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_policy_json(json: &str) -> Result<WorkingHoursPolicy, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid policy JSON: {}", e)))
}

fn parse_events_json(json: &str) -> Result<Vec<CalendarEvent>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

fn parse_slots_json(json: &str) -> Result<Vec<CandidateSlot>, JsValue> {
    let dtos: Vec<SlotDto> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))?;
    dtos.into_iter().map(SlotDto::into_slot).collect()
}

fn slots_to_json(slots: &[CandidateSlot]) -> Result<String, JsValue> {
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Events JSON → busy intervals in the policy's timezone, then scan.
fn scan_json(
    events_json: &str,
    policy_json: &str,
    now: &str,
) -> Result<Vec<CandidateSlot>, JsValue> {
    let policy = parse_policy_json(policy_json)?;
    let tz = policy.validate().map_err(js_err)?;
    let events = parse_events_json(events_json)?;
    let busy = slot_engine::busy_intervals_from_events(&events, tz).map_err(js_err)?;
    let now = parse_datetime(now)?;
    slot_engine::scan(&busy, &policy, now).map_err(js_err)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find every free working-hours slot.
///
/// # Arguments
/// - `events_json` -- JSON array of calendar events (`start`/`end` with
///   `dateTime` or `date`, optional `transparency`)
/// - `policy_json` -- JSON working-hours policy; missing fields take defaults
/// - `now` -- ISO 8601 reference instant
#[wasm_bindgen(js_name = "scanSlots")]
pub fn scan_slots(events_json: &str, policy_json: &str, now: &str) -> Result<String, JsValue> {
    let slots = scan_json(events_json, policy_json, now)?;
    slots_to_json(&slots)
}

/// Pick `count` diverse slots from a JSON slot array as returned by `scanSlots`.
#[wasm_bindgen(js_name = "selectSlots")]
pub fn select_slots(slots_json: &str, count: u32) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    let picked = slot_engine::select(&slots, count as usize);
    slots_to_json(&picked)
}

/// Scan and select in one call.
#[wasm_bindgen(js_name = "proposeSlots")]
pub fn propose_slots(
    events_json: &str,
    policy_json: &str,
    now: &str,
    count: u32,
) -> Result<String, JsValue> {
    let slots = scan_json(events_json, policy_json, now)?;
    let picked = slot_engine::select(&slots, count as usize);
    slots_to_json(&picked)
}

/// Attach confirmation links to slots.
///
/// Returns a JSON array of slot objects with an added `confirm_link`.
#[wasm_bindgen(js_name = "linkSlots")]
pub fn link_slots(
    slots_json: &str,
    base_url: &str,
    email_id: &str,
    sender: &str,
    now: &str,
) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    let issued_at = parse_datetime(now)?;
    let linked =
        confirm::link_slots(&slots, base_url, email_id, sender, issued_at).map_err(js_err)?;
    let dtos: Vec<LinkedSlotDto> = linked.iter().map(LinkedSlotDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Decode a confirmation token back into its request JSON.
#[wasm_bindgen(js_name = "decodeConfirmation")]
pub fn decode_confirmation(token: &str) -> Result<String, JsValue> {
    let request = confirm::decode_token(token).map_err(js_err)?;
    serde_json::to_string(&request)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Keyword heuristic for meeting requests.
#[wasm_bindgen(js_name = "isMeetingRequest")]
pub fn is_meeting_request(subject: &str, body: &str) -> bool {
    slot_engine::detect::is_meeting_request(subject, body)
}
