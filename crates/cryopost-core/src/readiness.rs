//! Readiness gate: has the envelope's unlock time arrived?
//!
//! Pure functions over (`unlock_time`, `now`). No clock access, no network.
//! The beacon is the actual time gate; this only prevents an early,
//! guaranteed-to-fail network round-trip and feeds the countdown display.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Whether the unlock time has arrived.
///
/// Monotonic in `now`: once true, stays true for every later instant.
pub fn is_ready(unlock_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= unlock_time
}

/// Time remaining until unlock, floored at zero.
pub fn time_remaining(unlock_time: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (unlock_time - now).to_std().unwrap_or(Duration::ZERO)
}

/// Render a remaining duration as a short countdown string.
///
/// `"3h 12m 9s"`, with leading zero components elided (`"12m 9s"`, `"9s"`).
/// A zero duration renders as `"0s"`.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
