//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. All
//! operations are synchronous; values cross the boundary as plain domain
//! models.

use anyhow::Result;

use crate::domain::calendar::DayKey;
use crate::domain::models::coverage_audit::CoverageAudit;
use crate::domain::models::enrolment::Enrolment;
use crate::domain::models::holiday::HolidayRange;
use crate::domain::models::plan::Plan;

/// Trait defining the interface for enrolment storage operations.
pub trait EnrolmentStorage: Send + Sync {
    /// Store a new enrolment (or overwrite an existing one wholesale).
    fn store_enrolment(&self, enrolment: &Enrolment) -> Result<()>;

    /// Retrieve a specific enrolment by ID.
    fn get_enrolment(&self, enrolment_id: &str) -> Result<Option<Enrolment>>;

    /// List all enrolments ordered by ID.
    fn list_enrolments(&self) -> Result<Vec<Enrolment>>;

    /// Persist a recompute outcome: the authoritative paid-through date and
    /// the system-derived copy, written together.
    fn update_paid_through(
        &self,
        enrolment_id: &str,
        paid_through: Option<DayKey>,
        computed: Option<DayKey>,
    ) -> Result<()>;
}

/// Trait defining the interface for plan storage operations.
pub trait PlanStorage: Send + Sync {
    /// Store a new plan (or overwrite an existing one).
    fn store_plan(&self, plan: &Plan) -> Result<()>;

    /// Retrieve a specific plan by ID.
    fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>>;

    /// List all plans ordered by ID.
    fn list_plans(&self) -> Result<Vec<Plan>>;
}

/// Trait defining the interface for holiday calendar storage operations.
pub trait HolidayStorage: Send + Sync {
    /// Store a new holiday range (or overwrite one with the same ID).
    fn store_holiday(&self, holiday: &HolidayRange) -> Result<()>;

    /// Delete a holiday range by ID.
    /// Returns true if the range was found and deleted, false otherwise.
    fn delete_holiday(&self, holiday_id: &str) -> Result<bool>;

    /// List all holiday ranges ordered by start day.
    fn list_holidays(&self) -> Result<Vec<HolidayRange>>;

    /// Holiday ranges intersecting the inclusive window `[start, end]`.
    fn ranges_overlapping(&self, start: &DayKey, end: &DayKey) -> Result<Vec<HolidayRange>>;
}

/// Trait defining the interface for the append-only coverage audit log.
pub trait CoverageAuditStorage: Send + Sync {
    /// Append one audit row. Rows are never updated or deleted.
    fn append_audit(&self, audit: &CoverageAudit) -> Result<()>;

    /// Audit rows for one enrolment in insertion order.
    fn list_audits(&self, enrolment_id: &str) -> Result<Vec<CoverageAudit>>;
}

/// Trait defining the interface for storage connections.
///
/// Abstracts the concrete backing (CSV files, SQL, ...) behind factory
/// methods for repositories, so the domain layer never names an
/// implementation type.
pub trait Connection: Send + Sync + Clone {
    type EnrolmentRepository: EnrolmentStorage;
    type PlanRepository: PlanStorage;
    type HolidayRepository: HolidayStorage;
    type AuditRepository: CoverageAuditStorage;

    fn create_enrolment_repository(&self) -> Self::EnrolmentRepository;
    fn create_plan_repository(&self) -> Self::PlanRepository;
    fn create_holiday_repository(&self) -> Self::HolidayRepository;
    fn create_audit_repository(&self) -> Self::AuditRepository;

    /// Run `f` while holding this connection's exclusive lock for one
    /// enrolment.
    ///
    /// Coverage recomputes execute entirely inside this scope so holiday
    /// edits, template reassignment and recompute never interleave within a
    /// single enrolment's record. Locks for different enrolments are
    /// independent. An error from `f` aborts the scope and propagates; no
    /// retry is attempted here.
    fn with_enrolment_lock<T>(
        &self,
        enrolment_id: &str,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T>;
}
