//! Shared fixtures for storage-backed tests.

use tempfile::TempDir;

use crate::domain::calendar::{DayKey, WeekdayIndex};
use crate::domain::models::enrolment::{AssignedTemplate, Enrolment, EnrolmentStatus};
use crate::domain::models::holiday::HolidayRange;
use crate::domain::models::plan::Plan;
use shared::BillingKind;

use super::CsvConnection;

/// Connection over a fresh temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn test_connection() -> (CsvConnection, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let connection = CsvConnection::new(temp_dir.path()).expect("Failed to create connection");
    (connection, temp_dir)
}

/// Active weekly-billed enrolment with one template per given weekday.
pub fn sample_enrolment(student_id: &str, start: &str, weekdays: Vec<WeekdayIndex>) -> Enrolment {
    let assigned_templates = weekdays
        .into_iter()
        .enumerate()
        .map(|(index, weekday)| AssignedTemplate {
            template_id: format!("template::{}", index + 1),
            weekday: Some(weekday),
        })
        .collect();

    Enrolment {
        id: Enrolment::generate_id(student_id, 1234567890),
        student_id: student_id.to_string(),
        plan_id: "plan::weekly".to_string(),
        status: EnrolmentStatus::Active,
        start_day: DayKey::parse(start).expect("invalid start day fixture"),
        end_day: None,
        paid_through_date: None,
        paid_through_date_computed: None,
        assigned_templates,
        legacy_template: None,
        created_at: "2026-01-01T09:00:00-05:00".to_string(),
        updated_at: "2026-01-01T09:00:00-05:00".to_string(),
    }
}

/// Weekly plan fixture with the ID `sample_enrolment` points at.
pub fn weekly_plan(price_cents: i64, sessions_per_week: u32) -> Plan {
    Plan {
        id: "plan::weekly".to_string(),
        name: "Weekly swim".to_string(),
        billing: BillingKind::Weekly,
        price_cents,
        sessions_per_week: Some(sessions_per_week),
        block_length: None,
        custom_block_length: None,
        created_at: "2026-01-01T09:00:00-05:00".to_string(),
        updated_at: "2026-01-01T09:00:00-05:00".to_string(),
    }
}

/// Holiday range fixture.
pub fn holiday(id: &str, start: &str, end: &str) -> HolidayRange {
    HolidayRange {
        id: id.to_string(),
        name: "Closure".to_string(),
        start_day: DayKey::parse(start).expect("invalid holiday start fixture"),
        end_day: DayKey::parse(end).expect("invalid holiday end fixture"),
    }
}
