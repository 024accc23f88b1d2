//! # slot-engine
//!
//! Deterministic meeting-slot proposal for scheduling assistants.
//!
//! Given a calendar's busy intervals and a working-hours policy, the engine
//! finds every free slot over a future horizon and picks a small, temporally
//! diverse subset to offer. Every function takes `now` explicitly and holds no
//! state between calls.
//!
//! ## Modules
//!
//! - [`scanner`]: busy intervals + policy → ordered free candidate slots
//! - [`selector`]: pick N slots spread across the horizon and the day
//! - [`conflict`]: any-overlap test between a slot and busy intervals
//! - [`busy`]: busy intervals and calendar-event ingestion
//! - [`policy`]: working-hours policy and TOML configuration
//! - [`propose`]: ingestion, scan and selection chained together
//! - [`confirm`]: confirmation tokens, links and calendar event drafts
//! - [`reply`]: draft reply text listing the proposed slots
//! - [`detect`]: keyword heuristic for meeting requests
//! - [`dst`]: local wall-time resolution across DST transitions
//! - [`error`]: Error types

pub mod busy;
pub mod confirm;
pub mod conflict;
pub mod detect;
pub mod dst;
pub mod error;
pub mod policy;
pub mod propose;
pub mod reply;
pub mod scanner;
pub mod selector;

pub use busy::{busy_intervals_from_events, BusyInterval, CalendarEvent, EventTime};
pub use error::SlotError;
pub use policy::{SchedulerConfig, WorkingHoursPolicy};
pub use propose::{propose_from_events, propose_slots, propose_slots_with};
pub use scanner::{scan, CandidateSlot};
pub use selector::{select, DiverseSelection, EarliestSelection, SelectionStrategy};
