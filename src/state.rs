//! # Schedule State Resolver
//!
//! Maps a point in time onto the window timetable: which named window is
//! active, how far through it we are, how long until its boundary, and
//! whether the fast is currently in force.
//!
//! Computation stays typed (timestamps, durations, integers); turning the
//! values into "HH:MM" strings is confined to the `*_label` presentation
//! helpers so the core can be tested without string parsing.

use crate::{EventKind, Window};
use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;

/// The dawn-to-sunset bracket that defines the fasting state.
///
/// This is a property of the day, not of any single window: the fast runs
/// across several windows and flips exactly at the sunset marker.
#[derive(Clone, Copy, Debug)]
pub struct FastingBracket {
    /// Dawn marker (fast begins)
    pub begins: DateTime<Tz>,
    /// Sunset marker (fast ends)
    pub ends: DateTime<Tz>,
}

impl FastingBracket {
    /// Half-open test: fasting at dawn, eating again the instant of sunset.
    pub fn active(&self, now: DateTime<Tz>) -> bool {
        self.begins <= now && now < self.ends
    }
}

/// Read-only snapshot derived for one "now". Recomputed on every run.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleState {
    /// Label of the active window
    pub current: EventKind,
    /// Event at the active window's end (the next boundary)
    pub next: EventKind,
    /// When the active window closes
    pub ends_at: DateTime<Tz>,
    /// Elapsed fraction of the active window, clamped to 0-100
    pub progress: u8,
    /// Time remaining until the boundary, never negative
    pub countdown: Duration,
    /// Whether the dawn-to-sunset fast is in force
    pub fasting_active: bool,
}

impl ScheduleState {
    /// Binary eat-state label for the payload.
    pub fn eat_state(&self) -> &'static str {
        if self.fasting_active {
            "No Eat"
        } else {
            "Eat"
        }
    }

    /// Countdown as "HH:MM", seconds discarded (floored, not rounded).
    pub fn countdown_label(&self) -> String {
        let total_minutes = self.countdown.num_minutes();
        format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
    }

    /// Boundary clock time as "HH:MM" local time.
    pub fn ends_at_label(&self) -> String {
        format!("{:02}:{:02}", self.ends_at.hour(), self.ends_at.minute())
    }
}

/// Resolve the schedule state at `now` against an ordered window list.
///
/// If `now` falls after the last boundary (clock drift, or a list that does
/// not reach far enough into the future), the last window is used as a
/// fallback rather than failing. Returns `None` only for an empty list,
/// which the timetable builder never produces.
pub fn resolve(
    now: DateTime<Tz>,
    windows: &[Window],
    fast: &FastingBracket,
) -> Option<ScheduleState> {
    let (index, window) = windows
        .iter()
        .enumerate()
        .find(|(_, w)| w.contains(now))
        .unwrap_or((windows.len().checked_sub(1)?, windows.last()?));

    // The window after this one opens at our boundary; the final window
    // always closes at tomorrow's dawn marker.
    let next = windows
        .get(index + 1)
        .map(|w| w.name)
        .unwrap_or(EventKind::Sihori);

    let width = (window.end - window.start).num_seconds();
    let elapsed = (now - window.start).num_seconds();
    let progress = if width > 0 {
        (100.0 * elapsed as f64 / width as f64).clamp(0.0, 100.0) as u8
    } else {
        0
    };

    let countdown = (window.end - now).max(Duration::zero());

    Some(ScheduleState {
        current: window.name,
        next,
        ends_at: window.end,
        progress,
        countdown,
        fasting_active: fast.active(now),
    })
}
