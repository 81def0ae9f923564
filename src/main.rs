//! # Fasting Tracker Application Entry Point
//!
//! One-shot batch run: read the wall clock once, compute the day's window
//! timetable and schedule state, flatten it into the webhook payload, and
//! push it. Intended to be invoked once a minute by cron; there is no loop,
//! no retry, and nothing persisted between runs.
//!
//! A failed or timed-out push exits non-zero so the scheduler's monitoring
//! can see it. `--stdout` prints the payload instead of pushing, for
//! development without a webhook.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::Utc;
use std::env;
use std::time::Duration;

use fasting_clock_lib::config::{self, Config};
use fasting_clock_lib::push::{self, Payload};
use fasting_clock_lib::state::FastingBracket;
use fasting_clock_lib::{events, hijri, state, timetable};

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Development mode: print the payload to stdout instead of pushing
    let stdout_mode = env::args().any(|arg| arg == "--stdout");

    let config = Config::load();
    let tz = config.timezone().context("invalid time-zone configuration")?;

    // Fail fast before any computation if the webhook is not configured;
    // stdout mode never pushes, so it runs without one
    let url = if stdout_mode {
        None
    } else {
        Some(config::webhook_url().context("webhook address is required")?)
    };

    // Single wall-clock read; everything below is deterministic
    let now = Utc::now().with_timezone(&tz);
    let today = now.date_naive();

    let day = events::resolve_day(today, &config.location, &config.angles, tz);
    let windows = timetable::build_windows(&day, tz);
    let fast = FastingBracket {
        begins: day.at(day.sihori, tz),
        ends: day.at(day.maghrib, tz),
    };

    let state = state::resolve(now, &windows, &fast).context("empty window timetable")?;
    let hijri = hijri::to_hijri(today, &config.calendar);
    let payload = Payload::new(today, &state, &hijri);

    log::info!(
        "{} ({}): {} until {} at {}, {}% elapsed, {}",
        today,
        payload.hijri,
        payload.current_name,
        payload.next_name,
        payload.next_time,
        payload.progress,
        payload.eat_state
    );

    let url = match url {
        Some(url) => url,
        None => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }
    };

    // Create Tokio runtime for the single async POST
    let rt = tokio::runtime::Runtime::new()?;
    let status = rt
        .block_on(push::push(
            &url,
            &payload,
            Duration::from_secs(config.push.timeout_secs),
        ))
        .context("webhook push failed")?;

    // Status is logged only; it never changes the exit code
    if status.is_success() {
        log::info!("webhook accepted the payload ({})", status);
    } else {
        log::warn!("webhook responded {}", status);
    }

    Ok(())
}
