//! # Solar Position Math
//!
//! Low-precision solar formulas from the NOAA General Solar Position
//! Calculations sheet: declination and equation of time as trigonometric
//! series of the fractional-year angle, plus the hour-angle inversion that
//! turns a target sun altitude into a clock offset from solar noon.
//!
//! Accuracy is on the order of a minute of clock time, which is plenty for a
//! once-a-minute timetable display.
//!
//! ## Saturation policy
//!
//! [`hour_angle`] clamps its cosine ratio to [-1, 1] before taking the
//! arccos. At latitudes and dates where the sun never crosses the target
//! altitude (polar summer/winter), the raw ratio falls outside that range;
//! clamping collapses the result to exactly 0 deg (event folds onto solar
//! noon) or 180 deg (event folds onto the opposite midnight), so every event
//! stays defined for every date. Callers must not treat the saturated values
//! as errors.

/// Fractional-year angle gamma in radians for a 1-based day of year.
pub fn fractional_year(day_of_year: u32) -> f64 {
    2.0 * std::f64::consts::PI / 365.0 * (day_of_year as f64 - 1.0)
}

/// Solar declination in radians for the fractional-year angle `gamma`.
pub fn declination(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}

/// Equation of time in minutes for the fractional-year angle `gamma`.
///
/// Positive values mean apparent solar time runs ahead of mean time.
pub fn equation_of_time(gamma: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin())
}

/// Hour angle in degrees at which the sun reaches `altitude_deg`.
///
/// `lat_rad` and `decl_rad` are in radians, the target altitude in degrees
/// (negative below the horizon). The returned magnitude is in [0, 180]; the
/// caller subtracts it from solar noon for the morning crossing and adds it
/// for the evening crossing (1 deg = 4 minutes of clock time).
///
/// The cosine ratio is clamped to [-1, 1] so polar-day/polar-night geometry
/// saturates instead of producing NaN.
pub fn hour_angle(lat_rad: f64, decl_rad: f64, altitude_deg: f64) -> f64 {
    let h = altitude_deg.to_radians();
    let cos_h =
        (h.sin() - lat_rad.sin() * decl_rad.sin()) / (lat_rad.cos() * decl_rad.cos());
    cos_h.clamp(-1.0, 1.0).acos().to_degrees()
}
