//! Availability scanning -- walk the horizon and collect free candidate slots.
//!
//! The cursor starts at the top of the hour after `now` and advances in steps
//! of the slot duration. Weekends, hours outside the working window, and slots
//! that would run past closing time send the cursor to the next day's opening
//! hour. Every remaining position is checked against the blocking intervals.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::busy::BusyInterval;
use crate::conflict;
use crate::dst;
use crate::error::{Result, SlotError};
use crate::policy::WorkingHoursPolicy;

/// A free slot found by [`scan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: u32,
    /// Local hour of `start` in the policy timezone.
    pub hour_of_day: u32,
    /// Calendar days between the scan's start date and `start`, both local.
    pub day_index: i64,
}

/// Find every free working-hours slot between the next full hour after `now`
/// and `now + policy.horizon_days` calendar days.
///
/// `busy` may be empty and in any order; non-blocking intervals are ignored.
/// The result is sorted by start time. Reaching `policy.max_iterations` ends
/// the scan early with the slots found so far.
///
/// # Errors
/// Returns `SlotError::InvalidPolicy` or `SlotError::InvalidTimezone` if the
/// policy fails [`WorkingHoursPolicy::validate`]. Finding nothing is not an
/// error.
pub fn scan(
    busy: &[BusyInterval],
    policy: &WorkingHoursPolicy,
    now: DateTime<Utc>,
) -> Result<Vec<CandidateSlot>> {
    let tz = policy.validate()?;
    let duration = policy.slot_duration();

    let search_start = top_of_next_hour(now.with_timezone(&tz));
    let search_end = horizon_end(now.with_timezone(&tz), policy.horizon_days)?;
    let start_date = search_start.date_naive();

    let blocking = busy.iter().filter(|b| b.is_blocking).count();
    debug!(
        blocking,
        transparent = busy.len() - blocking,
        %search_start,
        %search_end,
        "scanning for free slots"
    );

    let mut slots = Vec::new();
    let mut cursor = search_start;
    let mut iterations: u32 = 0;

    while cursor < search_end && iterations < policy.max_iterations {
        iterations += 1;

        let weekend = matches!(cursor.weekday(), Weekday::Sat | Weekday::Sun);
        let hour = cursor.hour();
        if weekend || hour < policy.start_hour || hour >= policy.end_hour {
            match next_opening(tz, cursor.date_naive(), policy.start_hour) {
                Some(next) => cursor = next,
                None => break,
            }
            continue;
        }

        let slot_end = cursor + duration;
        let closing = dst::local_hour_naive(cursor.date_naive(), policy.end_hour);
        if slot_end.naive_local() > closing {
            match next_opening(tz, cursor.date_naive(), policy.start_hour) {
                Some(next) => cursor = next,
                None => break,
            }
            continue;
        }

        let start_utc = cursor.with_timezone(&Utc);
        let end_utc = slot_end.with_timezone(&Utc);
        if !conflict::has_blocking_conflict(start_utc, end_utc, busy) {
            slots.push(CandidateSlot {
                start: start_utc,
                end: end_utc,
                duration_minutes: policy.slot_duration_minutes,
                hour_of_day: hour,
                day_index: (cursor.date_naive() - start_date).num_days(),
            });
        }

        cursor = slot_end;
    }

    if cursor < search_end && iterations >= policy.max_iterations {
        warn!(
            max_iterations = policy.max_iterations,
            found = slots.len(),
            "iteration cap reached before end of horizon"
        );
    }
    debug!(iterations, found = slots.len(), "scan finished");

    Ok(slots)
}

/// `now` truncated to its local hour, plus one hour. An instant already on
/// the hour still moves forward a full hour.
fn top_of_next_hour(now: DateTime<Tz>) -> DateTime<Tz> {
    let into_hour = Duration::minutes(i64::from(now.minute()))
        + Duration::seconds(i64::from(now.second()))
        + Duration::nanoseconds(i64::from(now.nanosecond()));
    now - into_hour + Duration::hours(1)
}

/// Same local wall time `days` calendar days after `now`.
fn horizon_end(now: DateTime<Tz>, days: u32) -> Result<DateTime<Tz>> {
    now.naive_local()
        .checked_add_days(Days::new(u64::from(days)))
        .map(|naive| dst::resolve_local(now.timezone(), naive))
        .ok_or_else(|| SlotError::InvalidPolicy(format!("horizon of {} days is out of range", days)))
}

/// Opening hour on the calendar day after `date`.
fn next_opening(tz: Tz, date: NaiveDate, start_hour: u32) -> Option<DateTime<Tz>> {
    date.succ_opt()
        .map(|next| dst::local_at_hour(tz, next, start_hour))
}
