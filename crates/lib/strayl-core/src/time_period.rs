//! Time-period token resolution.
//!
//! Maps human-friendly tokens such as `5m`, `1h`, `today`, `yesterday`, or
//! `last_7_days` to absolute UTC intervals. Relative tokens sample the clock
//! exactly once per resolution so start and end stay mutually consistent.

use chrono::{DateTime, Duration, Utc};

/// A half-open UTC interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Help text enumerating every supported time-period token.
pub const SUPPORTED_TIME_PERIODS: &str = "Supported time periods for log search:

Minutes:
  - 5m, 5_minutes, 5_mins - Last 5 minutes
  - 10m, 10_minutes - Last 10 minutes
  - 15m, 15_minutes - Last 15 minutes
  - 30m, 30_minutes - Last 30 minutes

Hours:
  - 1h, 1_hour - Last 1 hour
  - 2h, 2_hours - Last 2 hours
  - 6h, 6_hours - Last 6 hours
  - 12h, 12_hours - Last 12 hours
  - 24h, last_24_hours - Last 24 hours

Days:
  - today - Today from 00:00 UTC
  - yesterday - Full yesterday (00:00 to 23:59)
  - 7d, last_7_days - Last 7 days
  - 30d, last_30_days - Last 30 days

Examples:
  - search_logs_semantic(\"error connecting to database\", \"1h\")
  - search_logs_exact(\"timeout\", \"today\", level=\"error\")
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Minutes,
    Hours,
    Days,
}

/// Resolves a token against the current UTC instant.
///
/// Returns `None` for unrecognized tokens; never panics on malformed input.
#[must_use]
pub fn resolve(token: &str) -> Option<TimeRange> {
    resolve_at(token, Utc::now())
}

/// Resolves a token against an explicit `now`, for deterministic callers.
#[must_use]
pub fn resolve_at(token: &str, now: DateTime<Utc>) -> Option<TimeRange> {
    let token = token.trim().to_ascii_lowercase();
    match token.as_str() {
        "today" => {
            let start = start_of_day(now)?;
            Some(TimeRange { start, end: now })
        }
        "yesterday" => {
            let end = start_of_day(now)?;
            let start = end.checked_sub_signed(Duration::days(1))?;
            Some(TimeRange { start, end })
        }
        other => {
            let (count, unit) = parse_relative(other)?;
            let span = match unit {
                Unit::Minutes => Duration::try_minutes(count)?,
                Unit::Hours => Duration::try_hours(count)?,
                Unit::Days => Duration::try_days(count)?,
            };
            let start = now.checked_sub_signed(span)?;
            Some(TimeRange { start, end: now })
        }
    }
}

/// Parses `{N}<suffix>` tokens, optionally prefixed with `last_`.
///
/// N must be a positive decimal integer; the first matching suffix wins.
fn parse_relative(token: &str) -> Option<(i64, Unit)> {
    const SUFFIXES: [(&str, Unit); 8] = [
        ("_minutes", Unit::Minutes),
        ("_mins", Unit::Minutes),
        ("_hours", Unit::Hours),
        ("_hour", Unit::Hours),
        ("_days", Unit::Days),
        ("m", Unit::Minutes),
        ("h", Unit::Hours),
        ("d", Unit::Days),
    ];

    let token = token.strip_prefix("last_").unwrap_or(token);
    for (suffix, unit) in SUFFIXES {
        if let Some(digits) = token.strip_suffix(suffix) {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let count: i64 = digits.parse().ok()?;
            return (count > 0).then_some((count, unit));
        }
    }
    None
}

fn start_of_day(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Some(now.date_naive().and_hms_opt(0, 0, 0)?.and_utc())
}
