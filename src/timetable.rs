//! # Window Timetable Builder
//!
//! Folds the resolved day events into an ordered list of named, half-open
//! windows covering local midnight through tomorrow's dawn marker. Windows
//! are bounded by adjacent events only; the builder never invents a boundary
//! of its own. The night-midpoint markers are already derived from the
//! same-day sunset anchor inside the event resolver, so a derived marker can
//! never collide with a real event boundary here.
//!
//! The leading window `[midnight, dawn-marker)` carries the night-tail
//! label: it is the continuation of the previous night's final phase.

use crate::events::{self, DayEvents};
use crate::{EventKind, Window};
use chrono_tz::Tz;

/// Build the contiguous window list for one resolved day.
///
/// Invariants on the result:
/// - the first window starts at local midnight of `day.date`
/// - every window's `end` equals the next window's `start`
/// - the final window ends at tomorrow's dawn marker, on the next calendar
///   date
pub fn build_windows(day: &DayEvents, tz: Tz) -> Vec<Window> {
    let timeline = day.timeline(tz);
    let next_dawn = day.next_dawn(tz);

    let mut windows = Vec::with_capacity(timeline.len() + 1);
    let mut cursor = events::local_midnight(day.date, tz);
    let mut name = EventKind::NisfEnd;

    for event in &timeline {
        windows.push(Window {
            name,
            start: cursor,
            end: event.time,
        });
        cursor = event.time;
        name = event.kind;
    }

    // Close the night against tomorrow's dawn. The max() guard only matters
    // under polar saturation, where the night can collapse to zero width.
    windows.push(Window {
        name,
        start: cursor,
        end: next_dawn.time.max(cursor),
    });

    windows
}
