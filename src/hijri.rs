//! # Hijri Date Label
//!
//! A linear day-count offset from one known anchor date (day 1 of the
//! anchor month), not a real lunar computation.
//!
//! Known limitations, by design:
//! - dates before the anchor assume the prior month had exactly 30 days
//! - the year never rolls over, and the day count keeps growing past the
//!   month's true length
//!
//! The label is therefore only meaningful near the anchor date, which is
//! exactly the window this tracker is deployed for.

use crate::config::CalendarConfig;
use chrono::NaiveDate;

/// Hijri month names, 1-indexed by month number.
pub const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi I",
    "Rabi II",
    "Jumada I",
    "Jumada II",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhul Qa'dah",
    "Dhul Hijjah",
];

/// A (day, month, year) label in the secondary calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HijriLabel {
    pub day: i64,
    /// Month number, 1-12
    pub month: u32,
    pub year: i32,
}

impl HijriLabel {
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize - 1) % 12]
    }
}

impl std::fmt::Display for HijriLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

/// Label a Gregorian date relative to the configured anchor.
pub fn to_hijri(date: NaiveDate, anchor: &CalendarConfig) -> HijriLabel {
    let delta_days = (date - anchor.anchor_date).num_days();

    let mut day = 1 + delta_days;
    let mut month = anchor.anchor_month;

    if day <= 0 {
        // Step back into the prior month, assuming it ran 30 days.
        month = if month == 1 { 12 } else { month - 1 };
        day += 30;
    }

    HijriLabel {
        day,
        month,
        year: anchor.anchor_year,
    }
}
