//! Domain model for a student's enrolment in a recurring class plan.

use serde::{Deserialize, Serialize};

use crate::domain::calendar::{is_valid_weekday, DayKey, WeekdayIndex};

/// Lifecycle state of an enrolment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrolmentStatus {
    Active,
    Paused,
    Ended,
}

/// Weak reference to a recurring class slot.
///
/// Carries only the weekday the slot occupies. A template with no weekday
/// assigned is valid and contributes nothing to scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedTemplate {
    pub template_id: String,
    pub weekday: Option<WeekdayIndex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrolment {
    pub id: String,
    pub student_id: String,
    pub plan_id: String,
    pub status: EnrolmentStatus,
    pub start_day: DayKey,
    pub end_day: Option<DayKey>,
    /// Authoritative paid-through date. Staff may edit this directly.
    pub paid_through_date: Option<DayKey>,
    /// Last system-derived paid-through date; preferred basis for the next
    /// recompute when present.
    pub paid_through_date_computed: Option<DayKey>,
    /// Multi-template assignment list. Preferred over `legacy_template`
    /// whenever non-empty.
    pub assigned_templates: Vec<AssignedTemplate>,
    /// Single-slot reference kept for enrolments created before
    /// multi-template assignment existed.
    pub legacy_template: Option<AssignedTemplate>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl Enrolment {
    /// Generate a unique enrolment ID.
    /// Format: enrolment::<student_id>::<timestamp_ms>
    pub fn generate_id(student_id: &str, timestamp_ms: u64) -> String {
        format!("enrolment::{}::{}", student_id, timestamp_ms)
    }

    pub fn is_active(&self) -> bool {
        self.status == EnrolmentStatus::Active
    }

    /// Weekdays the enrolment's classes currently occupy, one entry per
    /// template (duplicates meaningful: two slots on one weekday consume
    /// two entitlement units on that day).
    ///
    /// The explicit assignment list wins when non-empty; otherwise the
    /// legacy single-template reference is used. Templates without a valid
    /// weekday are skipped.
    pub fn assigned_weekdays(&self) -> Vec<WeekdayIndex> {
        let templates: &[AssignedTemplate] = if !self.assigned_templates.is_empty() {
            &self.assigned_templates
        } else {
            self.legacy_template.as_slice()
        };

        templates
            .iter()
            .filter_map(|template| template.weekday)
            .filter(|weekday| is_valid_weekday(*weekday))
            .collect()
    }

    /// Basis date for entitlement derivation: the last system-derived
    /// paid-through when available, else the authoritative date.
    pub fn basis_paid_through(&self) -> Option<DayKey> {
        self.paid_through_date_computed
            .or(self.paid_through_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, weekday: Option<WeekdayIndex>) -> AssignedTemplate {
        AssignedTemplate {
            template_id: id.to_string(),
            weekday,
        }
    }

    fn enrolment_with(
        templates: Vec<AssignedTemplate>,
        legacy: Option<AssignedTemplate>,
    ) -> Enrolment {
        Enrolment {
            id: Enrolment::generate_id("student::1", 1234567890),
            student_id: "student::1".to_string(),
            plan_id: "plan::1".to_string(),
            status: EnrolmentStatus::Active,
            start_day: DayKey::parse("2026-03-02").unwrap(),
            end_day: None,
            paid_through_date: None,
            paid_through_date_computed: None,
            assigned_templates: templates,
            legacy_template: legacy,
            created_at: "2026-03-02T09:00:00-05:00".to_string(),
            updated_at: "2026-03-02T09:00:00-05:00".to_string(),
        }
    }

    #[test]
    fn test_generate_id() {
        assert_eq!(
            Enrolment::generate_id("student::42", 1234567890),
            "enrolment::student::42::1234567890"
        );
    }

    #[test]
    fn test_assignment_list_preferred_over_legacy() {
        let enrolment = enrolment_with(
            vec![template("t1", Some(1)), template("t2", Some(4))],
            Some(template("legacy", Some(0))),
        );
        assert_eq!(enrolment.assigned_weekdays(), vec![1, 4]);
    }

    #[test]
    fn test_legacy_template_used_when_list_empty() {
        let enrolment = enrolment_with(vec![], Some(template("legacy", Some(0))));
        assert_eq!(enrolment.assigned_weekdays(), vec![0]);
    }

    #[test]
    fn test_unassigned_templates_contribute_nothing() {
        let enrolment = enrolment_with(
            vec![template("t1", None), template("t2", Some(2))],
            None,
        );
        assert_eq!(enrolment.assigned_weekdays(), vec![2]);

        let empty = enrolment_with(vec![template("t1", None)], None);
        assert!(empty.assigned_weekdays().is_empty());
    }

    #[test]
    fn test_basis_prefers_computed_date() {
        let mut enrolment = enrolment_with(vec![], None);
        enrolment.paid_through_date = Some(DayKey::parse("2026-05-01").unwrap());
        enrolment.paid_through_date_computed = Some(DayKey::parse("2026-05-11").unwrap());
        assert_eq!(
            enrolment.basis_paid_through(),
            Some(DayKey::parse("2026-05-11").unwrap())
        );

        enrolment.paid_through_date_computed = None;
        assert_eq!(
            enrolment.basis_paid_through(),
            Some(DayKey::parse("2026-05-01").unwrap())
        );
    }
}
