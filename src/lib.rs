//! # Fasting Tracker Core Library
//!
//! This library computes, for one fixed location and time zone, the daily
//! table of solar/ritual-observance events (dawn marker, sunrise, solar noon,
//! afternoon shadow markers, sunset, night midpoints) and derives from it the
//! currently active time window, a countdown to the next boundary, a progress
//! percentage, a fasting/eating state, and a Hijri date label.
//!
//! ## Design Philosophy
//!
//! ### One-shot batch computation
//! The binary is intended to be run once a minute by cron (or a similar
//! scheduler). Every invocation reads the wall clock once, recomputes the
//! full timetable deterministically, and pushes a single flat payload to a
//! TRMNL webhook. Nothing is persisted between runs.
//!
//! ### Pure core, thin edges
//! All the algorithmic content lives in [`solar`], [`events`], [`timetable`],
//! [`state`], and [`hijri`]: pure functions over explicit configuration
//! values. The HTTP push ([`push`]) and the entry point are thin wrappers
//! that flatten the computed [`state::ScheduleState`] into string/number
//! pairs.
//!
//! ### Saturating astronomy
//! At extreme latitudes the sun may never reach a configured altitude. The
//! hour-angle computation clamps its cosine ratio to [-1, 1] so that such
//! events collapse onto solar noon or the full-day boundary instead of
//! failing; the timetable stays total for every date.
//!
//! ## Data Flow
//! 1. **Solar math**: day-of-year -> declination + equation of time
//! 2. **Event resolver**: location + zone offset -> minute offsets for each
//!    named event, for today and (dawn only) tomorrow
//! 3. **Timetable builder**: events -> contiguous named windows from local
//!    midnight through tomorrow's dawn
//! 4. **State resolver**: "now" -> active window, progress, countdown,
//!    eat state
//! 5. **Push**: flat payload -> one HTTP POST, observed for logging only

use chrono::DateTime;
use chrono_tz::Tz;

// Module declarations
pub mod config;
pub mod events;
pub mod hijri;
pub mod push;
pub mod solar;
pub mod state;
pub mod timetable;

/// The closed set of named day events.
///
/// The variants double as window phase labels: a window is named after the
/// event that opens it. `NisfEnd` also labels the leading window between
/// local midnight and the dawn marker, since that stretch continues the
/// previous night's final phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Dawn marker: end of the pre-dawn meal, start of the fast.
    Sihori,
    /// Sunrise at the configured horizon altitude.
    Sunrise,
    /// Solar noon (zenith transit).
    Zawal,
    /// End of the early-afternoon period (first shadow marker).
    ZuhrEnd,
    /// End of the late-afternoon period (second shadow marker).
    AsrEnd,
    /// Sunset marker: end of the fast.
    Maghrib,
    /// Start of the night-midpoint interval.
    NisfStart,
    /// End of the night-midpoint interval.
    NisfEnd,
}

impl EventKind {
    /// Human-readable label used in the webhook payload.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Sihori => "Sihori",
            EventKind::Sunrise => "Sunrise",
            EventKind::Zawal => "Zawal",
            EventKind::ZuhrEnd => "Zuhr End",
            EventKind::AsrEnd => "Asr End",
            EventKind::Maghrib => "Maghrib",
            EventKind::NisfStart => "Nisf Start",
            EventKind::NisfEnd => "Nisf End",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named point in time on the local timeline.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub kind: EventKind,
    pub time: DateTime<Tz>,
}

/// A named half-open interval `[start, end)` between two adjacent events.
///
/// The ordered window list produced by [`timetable::build_windows`] is
/// contiguous and non-overlapping: each instant from local midnight through
/// tomorrow's dawn belongs to exactly one window, including the stretch that
/// crosses midnight into the next calendar date.
#[derive(Clone, Copy, Debug)]
pub struct Window {
    /// Phase label (the event that opens this window).
    pub name: EventKind,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    /// Half-open containment test.
    pub fn contains(&self, t: DateTime<Tz>) -> bool {
        self.start <= t && t < self.end
    }
}
