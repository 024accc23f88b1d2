//! Working-hours policy and scheduler configuration.
//!
//! The policy is plain data: every field has a default matching a typical
//! office calendar (09:00-17:00, 30 minute slots, two weeks ahead), and the
//! whole thing can be read from TOML with any subset of fields present.
//!
//! ```toml
//! slots_to_offer = 3
//!
//! [policy]
//! start_hour = 10
//! end_hour = 16
//! timezone = "Europe/Berlin"
//! ```

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Default hard cap on scanner iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 2000;

/// When slots may be offered.
///
/// Hours are local wall-clock hours in [`timezone`](Self::timezone), half-open:
/// `[start_hour, end_hour)`. Saturday and Sunday are always excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingHoursPolicy {
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_duration_minutes: u32,
    /// Number of calendar days ahead of `now` to search.
    pub horizon_days: u32,
    /// IANA timezone name (e.g., "America/New_York").
    pub timezone: String,
    /// Upper bound on cursor steps per scan. Reaching it ends the scan early.
    pub max_iterations: u32,
}

impl Default for WorkingHoursPolicy {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            slot_duration_minutes: 30,
            horizon_days: 14,
            timezone: "UTC".to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl WorkingHoursPolicy {
    /// Check the policy and resolve its timezone.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidPolicy` for an empty or inverted hour range,
    /// an `end_hour` past 24, a zero slot duration or a zero horizon.
    /// Returns `SlotError::InvalidTimezone` if `timezone` is not an IANA name.
    pub fn validate(&self) -> Result<Tz> {
        if self.start_hour >= self.end_hour {
            return Err(SlotError::InvalidPolicy(format!(
                "start_hour ({}) must be before end_hour ({})",
                self.start_hour, self.end_hour
            )));
        }
        if self.end_hour > 24 {
            return Err(SlotError::InvalidPolicy(format!(
                "end_hour ({}) must be at most 24",
                self.end_hour
            )));
        }
        if self.slot_duration_minutes == 0 {
            return Err(SlotError::InvalidPolicy(
                "slot_duration_minutes must be positive".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(SlotError::InvalidPolicy(
                "horizon_days must be positive".to_string(),
            ));
        }

        self.timezone
            .parse::<Tz>()
            .map_err(|_| SlotError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_duration_minutes))
    }

    /// Parse a bare policy table from TOML. Missing fields take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SlotError::Config(e.to_string()))
    }
}

/// Scheduler configuration as stored on disk: the policy plus how many
/// slots to put in front of the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub slots_to_offer: usize,
    pub policy: WorkingHoursPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            slots_to_offer: 3,
            policy: WorkingHoursPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SlotError::Config(e.to_string()))
    }
}
