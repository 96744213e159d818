//! Coverage recompute service.
//!
//! Re-derives an enrolment's paid-through date whenever its schedule or the
//! holiday calendar changes underneath it. The entitlement the student paid
//! for is counted back out of the current paid-through date, then the
//! calendar is re-walked under the current schedule and holidays so the date
//! always reflects what was actually purchased.
//!
//! Callers own the triggering: holiday edits, template reassignment, plan
//! changes and invoice application all call [`CoverageService::recompute_coverage`]
//! with their reason code once their own write is durable.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{debug, info, warn};
use shared::BillingKind;

use crate::domain::calendar::WeekdayIndex;
use crate::domain::commands::coverage::{RecomputeCoverageCommand, RecomputeCoverageResult};
use crate::domain::coverage_walker::compute_coverage_end_day;
use crate::domain::models::coverage_audit::CoverageAudit;
use crate::domain::models::holiday::materialize_holiday_set;
use crate::domain::schedule::count_scheduled;
use crate::storage::traits::{
    Connection, CoverageAuditStorage, EnrolmentStorage, HolidayStorage, PlanStorage,
};

/// Service responsible for paid-through derivation and its audit trail.
pub struct CoverageService<C: Connection> {
    connection: Arc<C>,
    enrolment_repository: C::EnrolmentRepository,
    plan_repository: C::PlanRepository,
    holiday_repository: C::HolidayRepository,
    audit_repository: C::AuditRepository,
}

impl<C: Connection> CoverageService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let enrolment_repository = connection.create_enrolment_repository();
        let plan_repository = connection.create_plan_repository();
        let holiday_repository = connection.create_holiday_repository();
        let audit_repository = connection.create_audit_repository();
        Self {
            connection,
            enrolment_repository,
            plan_repository,
            holiday_repository,
            audit_repository,
        }
    }

    /// Recompute one enrolment's paid-through date.
    ///
    /// Runs as a single pass under the enrolment's storage lock. Returns
    /// `Ok(None)` without writing anything when a precondition fails: the
    /// enrolment is not active, its plan is not weekly-billed, it has no
    /// assigned weekdays, it has no basis paid-through date, or that basis
    /// precedes the enrolment start. Incomplete configuration is expected
    /// state, not an error.
    ///
    /// On success the new date (possibly none) is persisted and an audit
    /// row is appended even when the date did not change.
    pub fn recompute_coverage(
        &self,
        command: RecomputeCoverageCommand,
    ) -> Result<Option<RecomputeCoverageResult>> {
        info!(
            "Recomputing coverage for enrolment {} (reason: {})",
            command.enrolment_id, command.reason
        );

        self.connection
            .with_enrolment_lock(&command.enrolment_id, || self.recompute_locked(&command))
    }

    fn recompute_locked(
        &self,
        command: &RecomputeCoverageCommand,
    ) -> Result<Option<RecomputeCoverageResult>> {
        let enrolment = self
            .enrolment_repository
            .get_enrolment(&command.enrolment_id)?
            .ok_or_else(|| anyhow!("Enrolment not found: {}", command.enrolment_id))?;

        if !enrolment.is_active() {
            debug!("Enrolment {} is not active, skipping recompute", enrolment.id);
            return Ok(None);
        }

        let plan = match self.plan_repository.get_plan(&enrolment.plan_id)? {
            Some(plan) => plan,
            None => {
                debug!(
                    "Enrolment {} references missing plan {}, skipping recompute",
                    enrolment.id, enrolment.plan_id
                );
                return Ok(None);
            }
        };
        if plan.billing != BillingKind::Weekly {
            debug!(
                "Enrolment {} is {}-billed, recompute only applies to weekly plans",
                enrolment.id, plan.billing
            );
            return Ok(None);
        }

        let current_weekdays = enrolment.assigned_weekdays();
        if current_weekdays.is_empty() {
            debug!("Enrolment {} has no assigned weekdays, skipping recompute", enrolment.id);
            return Ok(None);
        }

        let basis = match enrolment.basis_paid_through() {
            Some(basis) => basis,
            None => {
                debug!(
                    "Enrolment {} has no paid-through basis, skipping recompute",
                    enrolment.id
                );
                return Ok(None);
            }
        };
        if basis < enrolment.start_day {
            warn!(
                "Enrolment {} basis {} precedes start {}, refusing to recompute",
                enrolment.id, basis, enrolment.start_day
            );
            return Ok(None);
        }

        // Sessions purchased so far. A schedule edit is folded in by
        // counting under the schedule the sessions accrued against, then
        // re-walking under the current one.
        let derive_weekdays: &[WeekdayIndex] = command
            .previous_weekdays
            .as_deref()
            .unwrap_or(&current_weekdays);
        let entitlement = count_scheduled(enrolment.start_day, basis, derive_weekdays, None);

        let horizon = enrolment.end_day.unwrap_or_else(|| {
            enrolment
                .start_day
                .add_days((entitlement as i64 * 7).max(365))
        });

        let holiday_ranges = self
            .holiday_repository
            .ranges_overlapping(&enrolment.start_day, &horizon)?;
        let holidays = materialize_holiday_set(&holiday_ranges);

        let new_paid_through = compute_coverage_end_day(
            enrolment.start_day,
            &current_weekdays,
            Some(&holidays),
            entitlement,
            enrolment.end_day,
            horizon,
        );

        let previous_paid_through = enrolment.paid_through_date;
        self.enrolment_repository
            .update_paid_through(&enrolment.id, new_paid_through, new_paid_through)?;

        let now = Utc::now();
        let audit = CoverageAudit {
            id: CoverageAudit::generate_id(&enrolment.id, now.timestamp_millis() as u64),
            enrolment_id: enrolment.id.clone(),
            reason: command.reason,
            previous_paid_through,
            next_paid_through: new_paid_through,
            actor: command.actor.clone(),
            created_at: now.to_rfc3339(),
        };
        self.audit_repository.append_audit(&audit)?;

        let changed = previous_paid_through != new_paid_through;
        info!(
            "Coverage for enrolment {}: {} -> {} ({} sessions, changed: {})",
            enrolment.id,
            previous_paid_through.map(|d| d.to_string()).unwrap_or_else(|| "none".to_string()),
            new_paid_through.map(|d| d.to_string()).unwrap_or_else(|| "none".to_string()),
            entitlement,
            changed
        );

        Ok(Some(RecomputeCoverageResult {
            enrolment_id: enrolment.id,
            previous_paid_through,
            new_paid_through,
            entitlement_sessions: entitlement,
            changed,
        }))
    }

    /// Full recompute history for one enrolment, oldest first.
    pub fn coverage_history(&self, enrolment_id: &str) -> Result<Vec<CoverageAudit>> {
        self.audit_repository.list_audits(enrolment_id)
    }
}
