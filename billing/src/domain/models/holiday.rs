//! Domain model for holiday closures.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::calendar::DayKey;

/// An inclusive range of days on which no classes run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRange {
    pub id: String,
    pub name: String,
    pub start_day: DayKey,
    pub end_day: DayKey,
}

impl HolidayRange {
    /// Generate a unique holiday ID.
    /// Format: holiday::<timestamp_ms>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("holiday::{}", timestamp_ms)
    }

    /// True when this range intersects the inclusive window `[start, end]`.
    pub fn overlaps(&self, start: &DayKey, end: &DayKey) -> bool {
        self.start_day <= *end && self.end_day >= *start
    }
}

/// Expand holiday ranges into a lookup set of excluded days.
///
/// Ranges whose end precedes their start expand to nothing.
pub fn materialize_holiday_set(ranges: &[HolidayRange]) -> HashSet<DayKey> {
    let mut days = HashSet::new();
    for range in ranges {
        let mut day = range.start_day;
        while day <= range.end_day {
            days.insert(day);
            day = day.add_days(1);
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn range(start: &str, end: &str) -> HolidayRange {
        HolidayRange {
            id: HolidayRange::generate_id(1234567890),
            name: "Winter break".to_string(),
            start_day: day(start),
            end_day: day(end),
        }
    }

    #[test]
    fn test_overlaps_window() {
        let closure = range("2026-12-21", "2027-01-03");
        assert!(closure.overlaps(&day("2026-12-01"), &day("2026-12-21")));
        assert!(closure.overlaps(&day("2027-01-03"), &day("2027-02-01")));
        assert!(closure.overlaps(&day("2026-12-25"), &day("2026-12-26")));
        assert!(!closure.overlaps(&day("2026-11-01"), &day("2026-12-20")));
        assert!(!closure.overlaps(&day("2027-01-04"), &day("2027-02-01")));
    }

    #[test]
    fn test_materialize_expands_inclusive_days() {
        let days = materialize_holiday_set(&[
            range("2026-01-26", "2026-01-28"),
            range("2026-02-02", "2026-02-02"),
        ]);
        assert_eq!(days.len(), 4);
        assert!(days.contains(&day("2026-01-26")));
        assert!(days.contains(&day("2026-01-28")));
        assert!(days.contains(&day("2026-02-02")));
        assert!(!days.contains(&day("2026-01-29")));
    }

    #[test]
    fn test_materialize_skips_inverted_ranges() {
        let days = materialize_holiday_set(&[range("2026-02-10", "2026-02-01")]);
        assert!(days.is_empty());
    }
}
