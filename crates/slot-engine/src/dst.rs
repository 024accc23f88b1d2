//! Local wall-clock resolution across DST transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

// Longest gap ever observed (Samoa skipping 2011-12-30) is one day.
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// Map a local wall time in `tz` to an instant.
///
/// Ambiguous times (clocks falling back) take the earlier instant. Times that
/// do not exist (clocks springing forward) move to the first valid minute
/// after the gap.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..MAX_GAP_MINUTES {
                probe += Duration::minutes(1);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt;
                }
            }
            tz.from_utc_datetime(&naive)
        }
    }
}

/// Local `date` at `hour:00`. `hour` may be 24, meaning midnight after `date`.
pub fn local_at_hour(tz: Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    resolve_local(tz, local_hour_naive(date, hour))
}

pub fn local_hour_naive(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour))
}
