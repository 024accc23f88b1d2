//! Busy intervals and their ingestion from calendar event payloads.
//!
//! A calendar data source hands over events whose start and end use either a
//! timed `dateTime` or an all-day `date`, plus an optional transparency marker.
//! Events marked `"transparent"` (shown as "free" in the source calendar) are
//! kept as non-blocking intervals so callers can still inspect them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst;
use crate::error::{Result, SlotError};

/// A half-open `[start, end)` range of occupied time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `false` for events the source calendar marks free/transparent.
    pub is_blocking: bool,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, is_blocking: bool) -> Self {
        Self {
            start,
            end,
            is_blocking,
        }
    }

    pub fn blocking(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, true)
    }

    pub fn transparent(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, false)
    }
}

/// Start or end of a calendar event, in Google Calendar's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventTime {
    /// Resolve to an instant, preferring `dateTime` over `date`.
    ///
    /// Returns `Ok(None)` when neither form is present.
    pub fn resolve(&self, tz: Tz) -> Result<Option<DateTime<Utc>>> {
        match self.date_time.as_deref().or(self.date.as_deref()) {
            Some(raw) => parse_timestamp(raw, tz).map(Some),
            None => Ok(None),
        }
    }
}

/// A calendar event as delivered by the external data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    /// `"transparent"` marks the event as not occupying time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<String>,
}

impl CalendarEvent {
    pub fn is_transparent(&self) -> bool {
        self.transparency.as_deref() == Some("transparent")
    }

    /// Convert to a [`BusyInterval`], or `None` if the event has no usable
    /// start or end.
    pub fn to_busy_interval(&self, tz: Tz) -> Result<Option<BusyInterval>> {
        let (Some(start), Some(end)) = (self.start.as_ref(), self.end.as_ref()) else {
            return Ok(None);
        };
        let (Some(start), Some(end)) = (start.resolve(tz)?, end.resolve(tz)?) else {
            return Ok(None);
        };
        Ok(Some(BusyInterval::new(start, end, !self.is_transparent())))
    }
}

/// Convert calendar events into busy intervals, skipping events without
/// times. Order is preserved.
///
/// # Errors
/// Returns `SlotError::InvalidTimestamp` if any present timestamp is malformed.
pub fn busy_intervals_from_events(events: &[CalendarEvent], tz: Tz) -> Result<Vec<BusyInterval>> {
    let mut intervals = Vec::with_capacity(events.len());
    for event in events {
        if let Some(interval) = event.to_busy_interval(tz)? {
            intervals.push(interval);
        }
    }
    Ok(intervals)
}

/// Parse a calendar timestamp into UTC.
///
/// Accepts RFC 3339 (`2026-03-16T09:00:00-04:00`), a naive local datetime
/// (`2026-03-16T09:00:00`, read in `tz`) and an all-day date (`2026-03-16`,
/// read as local midnight in `tz`).
pub fn parse_timestamp(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dst::resolve_local(tz, naive).with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| dst::local_at_hour(tz, date, 0).with_timezone(&Utc))
        .map_err(|e| SlotError::InvalidTimestamp(format!("'{}': {}", s, e)))
}
