//! Time types for the fetch window and event timestamps.
//!
//! This module provides [`TimeframeMode`] for the user-facing timeframe
//! selection, [`TimeWindow`] for the resolved query range, and
//! [`EventTimestamp`] for the loosely formatted date-times the scheduling API
//! returns.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default length of the [`TimeframeMode::FullSemester`] window, in days.
pub const DEFAULT_SEMESTER_DAYS: i64 = 180;

/// Date format accepted for custom range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYYMMDDTHHMMSS` at the start of a separator-stripped timestamp.
static COMPACT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{8}T\d{6})").expect("valid regex"));

/// Errors produced while interpreting timeframe input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeframeError {
    /// A custom range bound could not be parsed as a calendar date.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A custom range was requested without both bounds.
    #[error("a custom range needs both --from and --to")]
    MissingBound,

    /// The semester length is not a positive number of days.
    #[error("semester length must be a positive number of days, got {0}")]
    InvalidSemesterLength(i64),
}

/// Parses a `YYYY-MM-DD` date supplied by the date-picker collaborator.
pub fn parse_date(value: &str) -> Result<NaiveDate, TimeframeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        TimeframeError::InvalidDate {
            value: value.to_string(),
        }
    })
}

/// A time window for querying calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC. The window is not
/// required to be ordered: an inverted custom range is carried as-is and
/// simply matches nothing upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates a time window from a start time and duration.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if `start` is after `end`.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Returns true if no instant can fall within the window.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The timeframe the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeframeMode {
    /// The calendar month containing "now".
    CurrentMonth,
    /// From "now" for the given duration.
    FullSemester(Duration),
    /// Explicit dates, each taken at 00:00 UTC.
    CustomRange(NaiveDate, NaiveDate),
}

impl TimeframeMode {
    /// A semester window of [`DEFAULT_SEMESTER_DAYS`].
    pub fn full_semester() -> Self {
        Self::FullSemester(Duration::days(DEFAULT_SEMESTER_DAYS))
    }

    /// A semester window of `days` days.
    pub fn semester_of_days(days: i64) -> Result<Self, TimeframeError> {
        if days <= 0 {
            return Err(TimeframeError::InvalidSemesterLength(days));
        }
        Ok(Self::FullSemester(Duration::days(days)))
    }

    /// Resolves the mode against the current instant.
    pub fn resolve(&self) -> TimeWindow {
        self.resolve_at(Utc::now())
    }

    /// Resolves the mode against an explicit "now".
    pub fn resolve_at(&self, now: DateTime<Utc>) -> TimeWindow {
        match *self {
            Self::CurrentMonth => {
                let first = now
                    .date_naive()
                    .with_day(1)
                    .expect("day 1 exists in every month");
                let next = first
                    .checked_add_months(Months::new(1))
                    .expect("next month is representable");
                TimeWindow::new(midnight_utc(first), midnight_utc(next))
            }
            Self::FullSemester(duration) => TimeWindow::from_duration(now, duration),
            Self::CustomRange(start, end) => {
                TimeWindow::new(midnight_utc(start), midnight_utc(end))
            }
        }
    }

    /// Short human-readable description used in logs and status lines.
    pub fn describe(&self) -> String {
        match self {
            Self::CurrentMonth => "current month".to_string(),
            Self::FullSemester(duration) => format!("next {} days", duration.num_days()),
            Self::CustomRange(start, end) => format!("{start} to {end}"),
        }
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// A date-time as written by the scheduling API.
///
/// The original text is kept untouched; interpretation happens when the
/// timestamp is rendered. The only guarantee is a `T` separator with a
/// non-empty date and time on either side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTimestamp(String);

impl EventTimestamp {
    /// Accepts `raw` if it splits into a date and a time on `T`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (date, time) = trimmed.split_once('T')?;
        if date.is_empty() || time.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The timestamp text as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compact iCalendar UTC form, see [`compact_utc`].
    pub fn to_compact_utc(&self) -> Option<String> {
        compact_utc(&self.0)
    }

    /// The wall-clock value with any offset text dropped.
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        let compact = self.to_compact_utc()?;
        NaiveDateTime::parse_from_str(compact.trim_end_matches('Z'), "%Y%m%dT%H%M%S").ok()
    }
}

impl std::fmt::Display for EventTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrites an ISO-8601 timestamp into `YYYYMMDDTHHMMSSZ`.
///
/// This is a textual transform, not a timezone conversion: everything from
/// the first `+` is dropped, `-` and `:` are removed, anything past whole
/// seconds is discarded and a `Z` is appended. `09:00:00+02:00` therefore
/// becomes `090000Z`, not `070000Z`.
///
/// Returns `None` when the remaining text does not start with a valid
/// calendar date and time.
pub fn compact_utc(raw: &str) -> Option<String> {
    let without_offset = raw.trim().split('+').next().unwrap_or_default();
    let stripped: String = without_offset
        .chars()
        .filter(|c| *c != '-' && *c != ':')
        .collect();

    let prefix = COMPACT_PREFIX.captures(&stripped)?.get(1)?.as_str();
    NaiveDateTime::parse_from_str(prefix, "%Y%m%dT%H%M%S").ok()?;

    Some(format!("{prefix}Z"))
}
