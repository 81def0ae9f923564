//! # Day Event Resolver
//!
//! Turns one civil date plus the fixed location and angle set into minute
//! offsets (from local midnight) for every named event of that day, and for
//! the dawn marker of the following day. The next-day dawn is what lets the
//! timetable close the night without a gap at midnight.
//!
//! All arithmetic happens in fractional minutes on the local timeline and is
//! only converted to zone-aware timestamps at the edge ([`DayEvents::at`]).
//!
//! ## Daylight-saving attribution
//!
//! The UTC offset entering the solar-noon formula is sampled at the date's
//! *local noon*, not at midnight. On a transition day the switch happens in
//! the early morning, so noon carries the offset that actually applies to
//! the daylight events being computed.

use crate::config::{AngleConfig, LocationConfig};
use crate::solar;
use crate::{Event, EventKind};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Per-date astronomy tuple: declination, equation of time, solar noon.
///
/// Created fresh for each date requested; cheap enough that nothing is
/// cached across days.
#[derive(Clone, Copy, Debug)]
pub struct DayAstronomy {
    /// Solar declination in radians
    pub declination: f64,
    /// Equation of time in minutes
    pub eot_minutes: f64,
    /// Solar noon as minutes from local midnight
    pub solar_noon_minutes: f64,
}

/// Minutes-from-UTC offset of `tz` at the date's local noon.
pub fn zone_offset_minutes(date: NaiveDate, tz: Tz) -> f64 {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    let local = tz
        .from_local_datetime(&noon)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&noon));
    f64::from(local.offset().fix().local_minus_utc()) / 60.0
}

/// Local midnight of `date` as a zone-aware timestamp.
///
/// No real zone skips midnight by DST at this location; the UTC fallback
/// only guards against pathological zone data.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Declination, equation of time, and solar noon for one date.
pub fn day_astronomy(date: NaiveDate, location: &LocationConfig, tz: Tz) -> DayAstronomy {
    let gamma = solar::fractional_year(date.ordinal());
    let eot = solar::equation_of_time(gamma);
    DayAstronomy {
        declination: solar::declination(gamma),
        eot_minutes: eot,
        solar_noon_minutes: 720.0 - 4.0 * location.longitude - eot
            + zone_offset_minutes(date, tz),
    }
}

/// The fully resolved event table for one date.
///
/// All fields are fractional minutes from `date`'s local midnight. The six
/// daylight events sit inside [0, 1440); the night-midpoint markers and the
/// next-day dawn may exceed 1440, meaning they land on the following
/// calendar date. Saturating hour angles guarantee every field is populated
/// for every date.
#[derive(Clone, Copy, Debug)]
pub struct DayEvents {
    pub date: NaiveDate,
    pub sihori: f64,
    pub sunrise: f64,
    pub zawal: f64,
    pub zuhr_end: f64,
    pub asr_end: f64,
    pub maghrib: f64,
    pub nisf_start: f64,
    pub nisf_end: f64,
    /// Tomorrow's dawn marker, offset from *today's* midnight (always > 1440
    /// minus saturation edge cases, never wrapped back onto today).
    pub next_sihori: f64,
}

/// Resolve the complete event table for `date`.
pub fn resolve_day(
    date: NaiveDate,
    location: &LocationConfig,
    angles: &AngleConfig,
    tz: Tz,
) -> DayEvents {
    let lat_rad = location.latitude.to_radians();
    let astro = day_astronomy(date, location, tz);
    let noon = astro.solar_noon_minutes;

    // Horizon and dawn crossings, in minutes either side of solar noon
    let h0 = solar::hour_angle(lat_rad, astro.declination, angles.horizon_altitude);
    let sunrise = (noon - h0 * 4.0).rem_euclid(1440.0);
    let maghrib = (noon + h0 * 4.0).rem_euclid(1440.0);

    let hf = solar::hour_angle(lat_rad, astro.declination, -angles.dawn_angle);
    let sihori = (noon - hf * 4.0).rem_euclid(1440.0);

    // Afternoon markers from shadow lengths: a vertical gnomon casts a shadow
    // of `tan|lat - decl|` of its height at noon; each marker fires when the
    // shadow has grown by the configured factor.
    let noon_shadow = (lat_rad - astro.declination).abs().tan();
    let alt_start = (1.0 / (angles.asr_factor_start + noon_shadow)).atan().to_degrees();
    let alt_end = (1.0 / (angles.asr_factor_end + noon_shadow)).atan().to_degrees();
    let zuhr_end = (noon + solar::hour_angle(lat_rad, astro.declination, alt_start) * 4.0)
        .rem_euclid(1440.0);
    let asr_end = (noon + solar::hour_angle(lat_rad, astro.declination, alt_end) * 4.0)
        .rem_euclid(1440.0);

    // Tomorrow's dawn closes tonight. Its solar noon gets +1440 so the
    // resulting offset stays on the following calendar date.
    let tomorrow = date + Duration::days(1);
    let astro_next = day_astronomy(tomorrow, location, tz);
    let hf_next = solar::hour_angle(lat_rad, astro_next.declination, -angles.dawn_angle);
    let next_sihori = astro_next.solar_noon_minutes + 1440.0 - hf_next * 4.0;

    // Night midpoints split the dark interval at fixed fractions, anchored
    // on the same-day sunset so they can never cross a real boundary.
    let night_length = next_sihori - maghrib;
    let nisf_start = maghrib + night_length * angles.nisf_start_ratio;
    let nisf_end = maghrib + night_length * angles.nisf_end_ratio;

    DayEvents {
        date,
        sihori,
        sunrise,
        zawal: noon,
        zuhr_end,
        asr_end,
        maghrib,
        nisf_start,
        nisf_end,
        next_sihori,
    }
}

impl DayEvents {
    /// Materialize a minute offset as a zone-aware timestamp.
    ///
    /// Offsets beyond 1440 land on the following calendar date, which is
    /// exactly what the night-tail windows need.
    pub fn at(&self, minutes: f64, tz: Tz) -> DateTime<Tz> {
        local_midnight(self.date, tz) + Duration::seconds((minutes * 60.0).round() as i64)
    }

    /// Today's eight events in chronological order.
    pub fn timeline(&self, tz: Tz) -> Vec<Event> {
        let mut events = vec![
            Event { kind: EventKind::Sihori, time: self.at(self.sihori, tz) },
            Event { kind: EventKind::Sunrise, time: self.at(self.sunrise, tz) },
            Event { kind: EventKind::Zawal, time: self.at(self.zawal, tz) },
            Event { kind: EventKind::ZuhrEnd, time: self.at(self.zuhr_end, tz) },
            Event { kind: EventKind::AsrEnd, time: self.at(self.asr_end, tz) },
            Event { kind: EventKind::Maghrib, time: self.at(self.maghrib, tz) },
            Event { kind: EventKind::NisfStart, time: self.at(self.nisf_start, tz) },
            Event { kind: EventKind::NisfEnd, time: self.at(self.nisf_end, tz) },
        ];
        events.sort_by_key(|e| e.time);
        events
    }

    /// Tomorrow's dawn marker as an absolute timestamp.
    pub fn next_dawn(&self, tz: Tz) -> Event {
        Event {
            kind: EventKind::Sihori,
            time: self.at(self.next_sihori, tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono_tz::Europe::Berlin;

    fn frankfurt_day(date: NaiveDate) -> DayEvents {
        let config = Config::default();
        resolve_day(date, &config.location, &config.angles, Berlin)
    }

    #[test]
    fn mid_february_events_are_ordered_and_plausible() {
        let day = frankfurt_day(NaiveDate::from_ymd_opt(2026, 2, 17).unwrap());

        // Rough clock checks for Frankfurt in mid February
        assert!((420.0..480.0).contains(&day.sunrise), "sunrise {}", day.sunrise);
        assert!((1040.0..1110.0).contains(&day.maghrib), "maghrib {}", day.maghrib);
        assert!((740.0..785.0).contains(&day.zawal), "zawal {}", day.zawal);

        // Strict chronological order within the day
        assert!(day.sihori < day.sunrise);
        assert!(day.sunrise < day.zawal);
        assert!(day.zawal < day.zuhr_end);
        assert!(day.zuhr_end < day.asr_end);
        assert!(day.asr_end < day.maghrib);
        assert!(day.maghrib < day.nisf_start);
        assert!(day.nisf_start < day.nisf_end);
        assert!(day.nisf_end < day.next_sihori);
    }

    #[test]
    fn night_markers_land_on_the_next_calendar_date() {
        // At this latitude both night midpoints fall shortly after midnight.
        let day = frankfurt_day(NaiveDate::from_ymd_opt(2026, 2, 17).unwrap());
        assert!(day.nisf_start > 1440.0, "nisf start {}", day.nisf_start);
        assert!(day.next_sihori > 1440.0);

        let tz = Berlin;
        let start = day.at(day.nisf_start, tz);
        assert_eq!(
            start.date_naive(),
            NaiveDate::from_ymd_opt(2026, 2, 18).unwrap()
        );
    }

    #[test]
    fn zone_offset_is_taken_at_noon_on_the_transition_day() {
        // Europe switches to DST in the early morning of 2026-03-29: the
        // offset attributed to that whole day must be the summer one.
        let before = NaiveDate::from_ymd_opt(2026, 3, 28).unwrap();
        let switch = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap();
        assert_eq!(zone_offset_minutes(before, Berlin), 60.0);
        assert_eq!(zone_offset_minutes(switch, Berlin), 120.0);
    }

    #[test]
    fn timeline_is_sorted_and_complete() {
        let day = frankfurt_day(NaiveDate::from_ymd_opt(2026, 6, 21).unwrap());
        let events = day.timeline(Berlin);
        assert_eq!(events.len(), 8);
        for pair in events.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        assert!(day.next_dawn(Berlin).time > events[7].time);
    }

    #[test]
    fn polar_latitude_still_yields_a_total_event_table() {
        // Tromso in June: the dawn angle never resolves, so the saturated
        // hour angle folds sihori onto the opposite midnight instead of
        // leaving a hole in the table.
        let config = Config::default();
        let location = LocationConfig {
            latitude: 69.6492,
            longitude: 18.9553,
            timezone: "Europe/Oslo".to_string(),
        };
        let day = resolve_day(
            NaiveDate::from_ymd_opt(2026, 6, 21).unwrap(),
            &location,
            &config.angles,
            chrono_tz::Europe::Oslo,
        );
        assert!(day.sihori.is_finite());
        assert!(day.maghrib.is_finite());
        assert!(day.next_sihori.is_finite());
        assert!(day.nisf_start.is_finite());
    }
}
