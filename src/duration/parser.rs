//! Conversion between `MM:SS` strings and milliseconds

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, TimerError};

/// Up to three ASCII minute digits, one of `:` `,` `.`, then seconds 00-59.
static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{0,3})[:,.]([0-5][0-9])$").expect("Invalid duration regex")
});

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Check whether `input` is an acceptable duration string.
pub fn validate(input: &str) -> bool {
    DURATION_REGEX.is_match(input)
}

/// Parse a duration string into milliseconds.
///
/// Input that fails [`validate`] is rejected with
/// [`TimerError::InvalidDurationFormat`]; an empty minutes part counts as zero.
pub fn parse(input: &str) -> Result<u64> {
    let caps = DURATION_REGEX
        .captures(input)
        .ok_or_else(|| TimerError::InvalidDurationFormat(input.to_string()))?;

    let minutes = match caps.get(1).map(|m| m.as_str()) {
        Some("") | None => 0,
        Some(digits) => digits
            .parse::<u64>()
            .map_err(|_| TimerError::InvalidDurationFormat(input.to_string()))?,
    };
    let seconds = caps[2]
        .parse::<u64>()
        .map_err(|_| TimerError::InvalidDurationFormat(input.to_string()))?;

    Ok(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND)
}

/// Format milliseconds as zero-padded `MM:SS`.
///
/// Non-positive values render as `00:00`. The value is rounded to the nearest
/// whole second before being split, so `59_600` renders as `01:00`.
pub fn format(ms: i64) -> String {
    if ms <= 0 {
        return "00:00".to_string();
    }
    let ms = ms as u64;
    let total_seconds = (ms + MS_PER_SECOND / 2) / MS_PER_SECOND;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
