//! Splitting raw log lines into timestamp and narration
//!
//! Every line the game client writes has the shape
//! `[Tue Apr 12 13:09:04 2022] You hit a defender of fire for ...`.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::classify::classify;
use crate::error::LineError;
use crate::event::CombatEvent;

/// Format of the bracketed date-time text
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

static LINE_GROUPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<time>.+?)\]\s(?P<log>.+?)$").expect("line pattern is valid")
});

/// Whether the line carries the bracket/timestamp shape at all.
pub fn is_log_line(raw: &str) -> bool {
    LINE_GROUPS.is_match(raw)
}

/// Parse the bracketed date-time text.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, LineError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|source| {
        LineError::InvalidTimestamp {
            text: text.to_string(),
            source,
        }
    })
}

/// Split a raw line into its timestamp and narration.
///
/// The narration is returned exactly as it appears after the bracket and the
/// single separating whitespace character.
pub fn split_line(raw: &str) -> Result<(NaiveDateTime, &str), LineError> {
    let caps = LINE_GROUPS
        .captures(raw)
        .ok_or_else(|| LineError::invalid_format(raw))?;

    let (Some(time), Some(log)) = (caps.name("time"), caps.name("log")) else {
        return Err(LineError::invalid_format(raw));
    };

    let timestamp = parse_timestamp(time.as_str())?;
    Ok((timestamp, log.as_str()))
}

/// Split and classify one raw line.
pub fn parse_line(raw: &str) -> Result<CombatEvent, LineError> {
    let (timestamp, narration) = split_line(raw)?;
    Ok(classify(timestamp, narration))
}
