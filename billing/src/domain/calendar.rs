//! Calendar day identity and arithmetic for billing.
//!
//! Every paid-through computation works on whole calendar days in one fixed
//! reference timezone. Instants arriving from callers (payment timestamps,
//! schedule edits) are normalized here before any day arithmetic happens, so
//! a due date never shifts by a day depending on the UTC encoding of its
//! source timestamp or on a daylight-saving transition.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference timezone for all billing day arithmetic.
///
/// Fixed for the whole system; deliberately not the user's local timezone.
pub const REFERENCE_TZ: Tz = chrono_tz::America::New_York;

/// Day-of-week index in the billing calendar: Monday = 0 ... Sunday = 6.
///
/// This is NOT the Sunday = 0 convention used by `num_days_from_sunday`;
/// every conversion from a chrono date goes through [`DayKey::weekday_index`]
/// so the remap stays in one place.
pub type WeekdayIndex = u8;

/// Weekday slots in a week, sized for multiplicity tables indexed by
/// [`WeekdayIndex`].
pub const DAYS_PER_WEEK: usize = 7;

/// Check that a weekday index is within the canonical 0..=6 range.
pub fn is_valid_weekday(index: WeekdayIndex) -> bool {
    index <= 6
}

/// Errors from calendar input parsing and normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// Input could not be interpreted as a date or instant. Raised instead
    /// of coercing to any default.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// A single calendar day in the reference timezone.
///
/// Serializes as an ISO 8601 `YYYY-MM-DD` string, and the derived ordering
/// matches lexicographic ordering of that string form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Normalize an instant (in any timezone) to its calendar day in the
    /// reference timezone.
    pub fn from_instant<Z: TimeZone>(instant: &DateTime<Z>) -> DayKey {
        DayKey(instant.with_timezone(&REFERENCE_TZ).date_naive())
    }

    /// Parse a plain `YYYY-MM-DD` day string.
    pub fn parse(value: &str) -> Result<DayKey, CalendarError> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(DayKey)
            .map_err(|_| CalendarError::InvalidDate(value.to_string()))
    }

    /// Parse an RFC 3339 timestamp and normalize it to a reference-timezone
    /// day.
    pub fn from_timestamp_str(value: &str) -> Result<DayKey, CalendarError> {
        let instant = DateTime::parse_from_rfc3339(value)
            .map_err(|_| CalendarError::InvalidDate(value.to_string()))?;
        Ok(DayKey::from_instant(&instant))
    }

    /// The instant this day begins in the reference timezone.
    pub fn start_of_day(&self) -> Result<DateTime<Tz>, CalendarError> {
        let midnight = self.0.and_hms_opt(0, 0, 0).unwrap();
        REFERENCE_TZ
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| CalendarError::InvalidDate(self.to_string()))
    }

    /// The day `days` after (or before, when negative) this one.
    pub fn add_days(&self, days: i64) -> DayKey {
        DayKey(self.0 + Duration::days(days))
    }

    /// Canonical weekday index, Monday = 0 ... Sunday = 6.
    pub fn weekday_index(&self) -> WeekdayIndex {
        // chrono's weekday(): Monday-based via num_days_from_monday, which
        // is exactly the canonical billing mapping.
        self.0.weekday().num_days_from_monday() as WeekdayIndex
    }

    /// Signed whole days from `self` to `other`.
    pub fn days_until(&self, other: &DayKey) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for DayKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::parse(s)
    }
}
