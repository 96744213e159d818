//! Day-by-day consumption of a session entitlement.
//!
//! Walks forward from an enrolment's start day, spending entitlement units
//! on each scheduled, non-holiday day until the entitlement runs out. The
//! terminal day of that walk is the enrolment's paid-through date.

use std::collections::HashSet;

use super::calendar::{DayKey, WeekdayIndex};
use super::schedule::weekday_multiplicity;

/// Walk the calendar and find the last day covered by `entitlement_sessions`.
///
/// Entitlement is consumed per calendar day, not per class instance: a day
/// carrying two classes consumes two units in one step, so both classes are
/// paid for by a single day advance. Returns `None` when the entitlement is
/// zero, no weekdays are mapped, or the walk never reached a scheduled day
/// inside its bounds.
///
/// `horizon` is a hard stop, not an optimization: a sparse schedule against
/// a large entitlement would otherwise walk unbounded. Callers without an
/// enrolment end day must bound the walk themselves (the orchestrator uses
/// `max(entitlement * 7, 365)` days from start).
pub fn compute_coverage_end_day(
    start: DayKey,
    weekdays: &[WeekdayIndex],
    holidays: Option<&HashSet<DayKey>>,
    entitlement_sessions: u32,
    end_day: Option<DayKey>,
    horizon: DayKey,
) -> Option<DayKey> {
    if entitlement_sessions == 0 {
        return None;
    }

    let table = weekday_multiplicity(weekdays);
    if table.iter().all(|&count| count == 0) {
        return None;
    }

    let mut remaining = entitlement_sessions as i64;
    let mut last_covered = None;
    let mut day = start;

    while day <= horizon {
        if let Some(end) = end_day {
            if day > end {
                break;
            }
        }

        let on_holiday = holidays.map(|set| set.contains(&day)).unwrap_or(false);
        if !on_holiday {
            let multiplicity = table[day.weekday_index() as usize];
            if multiplicity > 0 {
                remaining -= multiplicity as i64;
                last_covered = Some(day);
                if remaining <= 0 {
                    break;
                }
            }
        }

        day = day.add_days(1);
    }

    last_covered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::count_scheduled;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn far_horizon(start: &DayKey) -> DayKey {
        start.add_days(3650)
    }

    #[test]
    fn test_zero_entitlement_returns_none() {
        let start = day("2026-03-02");
        assert_eq!(
            compute_coverage_end_day(start, &[0], None, 0, None, far_horizon(&start)),
            None
        );
    }

    #[test]
    fn test_no_weekdays_returns_none() {
        let start = day("2026-03-02");
        assert_eq!(
            compute_coverage_end_day(start, &[], None, 5, None, far_horizon(&start)),
            None
        );
    }

    #[test]
    fn test_walk_lands_on_nth_occurrence() {
        // Eleven Tuesday sessions starting the Monday of 2026-03-02.
        let start = day("2026-03-02");
        let end = compute_coverage_end_day(start, &[1], None, 11, None, far_horizon(&start));
        assert_eq!(end, Some(day("2026-05-12")));
    }

    #[test]
    fn test_walk_skips_holiday_occurrences() {
        let start = day("2026-01-12");
        let holidays = [day("2026-01-27")].into_iter().collect();
        let end = compute_coverage_end_day(
            start,
            &[1],
            Some(&holidays),
            4,
            None,
            far_horizon(&start),
        );
        // Jan 13, Jan 20, (Jan 27 holiday), Feb 3, Feb 10.
        assert_eq!(end, Some(day("2026-02-10")));
    }

    #[test]
    fn test_double_class_day_consumes_two_units_in_one_step() {
        let start = day("2026-03-02");

        // One unit against a two-class Monday still covers that Monday.
        let end = compute_coverage_end_day(start, &[0, 0], None, 1, None, far_horizon(&start));
        assert_eq!(end, Some(day("2026-03-02")));

        // Three units cover two Mondays (2 + 2, overshooting by one).
        let end = compute_coverage_end_day(start, &[0, 0], None, 3, None, far_horizon(&start));
        assert_eq!(end, Some(day("2026-03-09")));
    }

    #[test]
    fn test_horizon_stops_an_unfinished_walk() {
        let start = day("2026-03-02");
        // Entitlement for ten Mondays but only three fit under the horizon.
        let end = compute_coverage_end_day(start, &[0], None, 10, None, start.add_days(15));
        assert_eq!(end, Some(day("2026-03-16")));
    }

    #[test]
    fn test_end_day_stops_the_walk() {
        let start = day("2026-03-02");
        let end = compute_coverage_end_day(
            start,
            &[0],
            None,
            10,
            Some(day("2026-03-10")),
            far_horizon(&start),
        );
        assert_eq!(end, Some(day("2026-03-09")));
    }

    #[test]
    fn test_bounds_before_first_occurrence_return_none() {
        // Start Monday, Friday classes, horizon on Wednesday: nothing covered.
        let start = day("2026-03-02");
        assert_eq!(
            compute_coverage_end_day(start, &[4], None, 3, None, start.add_days(2)),
            None
        );
    }

    #[test]
    fn test_consumption_property() {
        // Walking N sessions never covers more than N occurrences, and one
        // more scheduled day would exceed N.
        let start = day("2026-01-05");
        let holidays = [day("2026-01-13"), day("2026-02-05")].into_iter().collect();
        for entitlement in [1u32, 3, 8, 13] {
            let terminal = compute_coverage_end_day(
                start,
                &[1, 3],
                Some(&holidays),
                entitlement,
                None,
                far_horizon(&start),
            )
            .unwrap();

            let used = count_scheduled(start, terminal, &[1, 3], Some(&holidays));
            assert!(used <= entitlement, "entitlement {} overspent", entitlement);

            let next = crate::domain::schedule::next_scheduled_day(
                terminal.add_days(1),
                &[1, 3],
                Some(&holidays),
                None,
            )
            .unwrap();
            let overshoot = count_scheduled(start, next, &[1, 3], Some(&holidays));
            assert!(overshoot > entitlement);
        }
    }
}
