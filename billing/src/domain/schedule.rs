//! Scheduled-occurrence counting over assigned weekdays.
//!
//! An enrolment's recurring classes are reduced to a weekday multiplicity
//! table (two Tuesday classes count twice per Tuesday). These helpers walk
//! inclusive day ranges against that table, skipping holiday days, and are
//! the basis for both entitlement derivation and coverage walking.

use std::collections::HashSet;

use super::calendar::{is_valid_weekday, DayKey, WeekdayIndex, DAYS_PER_WEEK};

/// Occurrence count per canonical weekday index (Monday = slot 0).
pub type WeekdayMultiplicity = [u32; DAYS_PER_WEEK];

/// Build the multiplicity table for a list of assigned weekdays.
///
/// Duplicates accumulate (one slot per template on that weekday); out-of-range
/// indices contribute nothing rather than erroring, matching templates that
/// simply have no weekday assigned.
pub fn weekday_multiplicity(weekdays: &[WeekdayIndex]) -> WeekdayMultiplicity {
    let mut table = [0u32; DAYS_PER_WEEK];
    for &weekday in weekdays {
        if is_valid_weekday(weekday) {
            table[weekday as usize] += 1;
        }
    }
    table
}

fn no_weekdays_mapped(table: &WeekdayMultiplicity) -> bool {
    table.iter().all(|&count| count == 0)
}

fn is_holiday(day: &DayKey, holidays: Option<&HashSet<DayKey>>) -> bool {
    holidays.map(|set| set.contains(day)).unwrap_or(false)
}

/// Count scheduled class occurrences in the inclusive range `[start, end]`.
///
/// Returns 0 when the range is empty (`end < start`) or no weekdays are
/// mapped. Holiday days contribute 0 regardless of their multiplicity.
pub fn count_scheduled(
    start: DayKey,
    end: DayKey,
    weekdays: &[WeekdayIndex],
    holidays: Option<&HashSet<DayKey>>,
) -> u32 {
    if end < start {
        return 0;
    }

    let table = weekday_multiplicity(weekdays);
    if no_weekdays_mapped(&table) {
        return 0;
    }

    let mut total = 0;
    let mut day = start;
    while day <= end {
        if !is_holiday(&day, holidays) {
            total += table[day.weekday_index() as usize];
        }
        day = day.add_days(1);
    }
    total
}

/// First day at or after `start` with a scheduled, non-holiday occurrence.
///
/// When `horizon` is given, days beyond it are not considered and `None` is
/// returned if nothing matched. Without a horizon the scan is still bounded:
/// past the last holiday, every weekday occurs within a week.
pub fn next_scheduled_day(
    start: DayKey,
    weekdays: &[WeekdayIndex],
    holidays: Option<&HashSet<DayKey>>,
    horizon: Option<DayKey>,
) -> Option<DayKey> {
    let table = weekday_multiplicity(weekdays);
    if no_weekdays_mapped(&table) {
        return None;
    }

    let bound = horizon.unwrap_or_else(|| {
        let past_holidays = holidays
            .and_then(|set| set.iter().max().copied())
            .map(|last| last.add_days(DAYS_PER_WEEK as i64));
        let week_out = start.add_days(DAYS_PER_WEEK as i64);
        past_holidays.filter(|day| *day > week_out).unwrap_or(week_out)
    });

    let mut day = start;
    while day <= bound {
        if table[day.weekday_index() as usize] > 0 && !is_holiday(&day, holidays) {
            return Some(day);
        }
        day = day.add_days(1);
    }
    None
}
