//! End-to-end slot proposal: calendar events in, a short list of slots out.
//!
//! Chains busy-interval ingestion, [`scanner::scan`] and a
//! [`SelectionStrategy`], the way the scheduler answers "find me times to
//! offer this sender".

use chrono::{DateTime, Utc};
use tracing::info;

use crate::busy::{self, BusyInterval, CalendarEvent};
use crate::error::Result;
use crate::policy::WorkingHoursPolicy;
use crate::scanner::{self, CandidateSlot};
use crate::selector::{DiverseSelection, SelectionStrategy};

/// Scan `busy` and pick `count` diverse slots.
pub fn propose_slots(
    busy: &[BusyInterval],
    policy: &WorkingHoursPolicy,
    now: DateTime<Utc>,
    count: usize,
) -> Result<Vec<CandidateSlot>> {
    propose_slots_with(busy, policy, now, count, &DiverseSelection)
}

/// Scan `busy` and pick `count` slots with a caller-chosen strategy.
pub fn propose_slots_with<S: SelectionStrategy + ?Sized>(
    busy: &[BusyInterval],
    policy: &WorkingHoursPolicy,
    now: DateTime<Utc>,
    count: usize,
    strategy: &S,
) -> Result<Vec<CandidateSlot>> {
    let free = scanner::scan(busy, policy, now)?;
    let selected = strategy.select(&free, count);
    info!(
        available = free.len(),
        selected = selected.len(),
        "proposed slots"
    );
    Ok(selected)
}

/// Convert raw calendar events (in the policy timezone) and propose slots.
///
/// # Errors
/// Policy errors as in [`scanner::scan`]; `SlotError::InvalidTimestamp` for a
/// malformed event time.
pub fn propose_from_events(
    events: &[CalendarEvent],
    policy: &WorkingHoursPolicy,
    now: DateTime<Utc>,
    count: usize,
) -> Result<Vec<CandidateSlot>> {
    let tz = policy.validate()?;
    let intervals = busy::busy_intervals_from_events(events, tz)?;
    propose_slots(&intervals, policy, now, count)
}
