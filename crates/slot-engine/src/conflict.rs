//! Any-overlap test between a candidate slot and busy intervals.
//!
//! A slot `[s, e)` conflicts with an interval `[is, ie)` when it starts inside
//! the interval, ends inside it, or contains it. Ranges that merely touch
//! (`e == is` or `s == ie`) do NOT conflict.

use chrono::{DateTime, Utc};

use crate::busy::BusyInterval;

/// Whether `[slot_start, slot_end)` overlaps `interval`, ignoring
/// `is_blocking`.
pub fn overlaps(slot_start: DateTime<Utc>, slot_end: DateTime<Utc>, interval: &BusyInterval) -> bool {
    let starts_inside = slot_start >= interval.start && slot_start < interval.end;
    let ends_inside = slot_end > interval.start && slot_end <= interval.end;
    let contains = slot_start <= interval.start && slot_end >= interval.end;
    starts_inside || ends_inside || contains
}

/// Whether any blocking interval in `busy` overlaps the slot.
pub fn has_blocking_conflict(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> bool {
    busy.iter()
        .any(|interval| interval.is_blocking && overlaps(slot_start, slot_end, interval))
}

/// All blocking intervals that overlap the slot, in input order.
pub fn find_blocking_conflicts(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> Vec<&BusyInterval> {
    busy.iter()
        .filter(|interval| interval.is_blocking && overlaps(slot_start, slot_end, interval))
        .collect()
}
