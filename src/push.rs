//! # Webhook Payload and Push
//!
//! Flattens the computed schedule state into the flat key/value payload the
//! TRMNL plugin expects and sends it as a single HTTP POST, wrapped under
//! the `merge_variables` top-level key.
//!
//! The sink's response status is observed for logging only and never changes
//! program behavior; only a transport failure (connect error, timeout)
//! surfaces as an error, which the entry point turns into a non-zero exit.
//! There is no retry: the next cron run is the retry.

use crate::hijri::HijriLabel;
use crate::state::ScheduleState;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the outbound push.
#[derive(Error, Debug)]
pub enum PushError {
    /// HTTP transport failure (connect error, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The flat payload pushed to the webhook. No nesting below this struct.
#[derive(Debug, Serialize)]
pub struct Payload {
    /// Gregorian date, ISO formatted
    pub date: String,
    /// Hijri label, e.g. "17 Ramadan 1447 AH"
    pub hijri: String,
    /// Active window label
    pub current_name: &'static str,
    /// Event at the next boundary
    pub next_name: &'static str,
    /// Next boundary clock time, "HH:MM"
    pub next_time: String,
    /// Time remaining until the boundary, "HH:MM"
    pub countdown: String,
    /// Elapsed fraction of the active window, 0-100
    pub progress: u8,
    /// "Eat" or "No Eat"
    pub eat_state: &'static str,
}

impl Payload {
    /// Flatten a day's computed state into the wire shape.
    pub fn new(date: NaiveDate, state: &ScheduleState, hijri: &HijriLabel) -> Self {
        Payload {
            date: date.to_string(),
            hijri: hijri.to_string(),
            current_name: state.current.label(),
            next_name: state.next.label(),
            next_time: state.ends_at_label(),
            countdown: state.countdown_label(),
            progress: state.progress,
            eat_state: state.eat_state(),
        }
    }
}

/// POST the payload to the webhook with a bounded timeout.
///
/// Returns the response status for the caller to log.
pub async fn push(url: &str, payload: &Payload, timeout: Duration) -> Result<StatusCode, PushError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let response = client
        .post(url)
        .json(&serde_json::json!({ "merge_variables": payload }))
        .send()
        .await?;

    Ok(response.status())
}
