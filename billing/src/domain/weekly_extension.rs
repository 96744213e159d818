//! Holiday-driven extension for weekly billing.

/// Whole weeks of extension owed for holiday-missed sessions.
///
/// Weekly billing purchases a fixed number of sessions per week regardless
/// of which days they fall on, so any holiday-caused shortfall rounds up to
/// whole additional weeks. A non-positive sessions-per-week is treated as 1.
pub fn compute_weekly_holiday_extension_weeks(missed_sessions: u32, sessions_per_week: u32) -> u32 {
    if missed_sessions == 0 {
        return 0;
    }
    let per_week = sessions_per_week.max(1);
    (missed_sessions + per_week - 1) / per_week
}
