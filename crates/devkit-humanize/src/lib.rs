//! Human-readable durations and relative times.
//!
//! Two formatters:
//!
//! - [`humanize_duration`] renders a span of seconds compactly (`1h 1m 1s`).
//! - [`humanize_relative`] renders an instant relative to a reference
//!   (`3 days ago`, `2 weeks from now`).
//!
//! Both truncate toward zero. Plural suffixes are never adjusted, so one
//! second reads `1 seconds ago`.

use chrono::{DateTime, Duration, TimeZone};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Formats a span of seconds.
///
/// | Input            | Output       |
/// |------------------|--------------|
/// | `0`              | `0s`         |
/// | below a minute   | `Ns`         |
/// | below an hour    | `Xm Ys`      |
/// | below a day      | `Xh Ym Zs`   |
/// | a day or more    | `Xd`         |
///
/// Negative input is treated as "below a minute".
///
/// # Example
///
/// ```rust
/// use devkit_humanize::humanize_duration;
///
/// assert_eq!(humanize_duration(59), "59s");
/// assert_eq!(humanize_duration(3661), "1h 1m 1s");
/// assert_eq!(humanize_duration(90000), "1d");
/// ```
pub fn humanize_duration(seconds: i32) -> String {
    let seconds = i64::from(seconds);
    if seconds == 0 {
        "0s".to_string()
    } else if seconds < MINUTE {
        format!("{}s", seconds)
    } else if seconds < HOUR {
        format!("{}m {}s", seconds / MINUTE, seconds % MINUTE)
    } else if seconds < DAY {
        format!(
            "{}h {}m {}s",
            seconds / HOUR,
            (seconds % HOUR) / MINUTE,
            seconds % MINUTE
        )
    } else {
        format!("{}d", seconds / DAY)
    }
}

/// Formats `instant` relative to `reference`.
///
/// Returns `now` when both are equal. Otherwise the distance between them
/// picks the unit:
///
/// | Distance          | Unit                         |
/// |-------------------|------------------------------|
/// | under 1 minute    | seconds                      |
/// | under 1 hour      | minutes                      |
/// | under 24 hours    | hours                        |
/// | under 7 days      | days                         |
/// | under 30 days     | weeks                        |
/// | under 360 days    | months (30 days each)        |
/// | otherwise         | years (365 days each)        |
///
/// The count is followed by `ago` when `instant` is before `reference`, or
/// `from now` when it is after.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use devkit_humanize::humanize_relative;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// assert_eq!(humanize_relative(&(now - Duration::days(3)), &now), "3 days ago");
/// assert_eq!(humanize_relative(&(now + Duration::days(14)), &now), "2 weeks from now");
/// assert_eq!(humanize_relative(&now, &now), "now");
/// ```
pub fn humanize_relative<Tz: TimeZone, Tz2: TimeZone>(
    instant: &DateTime<Tz>,
    reference: &DateTime<Tz2>,
) -> String {
    let distance: Duration = reference.clone().signed_duration_since(instant.clone());

    let suffix = if distance > Duration::zero() {
        "ago"
    } else if distance < Duration::zero() {
        "from now"
    } else {
        return "now".to_string();
    };

    let (count, unit) = bucket(distance.num_seconds().abs());
    format!("{} {} {}", count, unit, suffix)
}

fn bucket(seconds: i64) -> (i64, &'static str) {
    match seconds {
        s if s < MINUTE => (s, "seconds"),
        s if s < HOUR => (s / MINUTE, "minutes"),
        s if s < DAY => (s / HOUR, "hours"),
        s if s < WEEK => (s / DAY, "days"),
        s if s < 30 * DAY => (s / WEEK, "weeks"),
        s if s < 360 * DAY => (s / (30 * DAY), "months"),
        s => (s / (365 * DAY), "years"),
    }
}
