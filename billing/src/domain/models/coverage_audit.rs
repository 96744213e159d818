//! Append-only audit trail of coverage recomputes.

use serde::{Deserialize, Serialize};
use shared::{CoverageAuditEntry, CoverageReason};

use crate::domain::calendar::DayKey;

/// One recompute pass over one enrolment.
///
/// A row is written on every successful pass, including passes that left the
/// paid-through date unchanged: the table is a trigger history, not a diff
/// log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageAudit {
    pub id: String,
    pub enrolment_id: String,
    pub reason: CoverageReason,
    pub previous_paid_through: Option<DayKey>,
    pub next_paid_through: Option<DayKey>,
    pub actor: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
}

impl CoverageAudit {
    /// Generate a unique audit row ID.
    /// Format: coverage_audit::<enrolment_id>::<timestamp_ms>
    pub fn generate_id(enrolment_id: &str, timestamp_ms: u64) -> String {
        format!("coverage_audit::{}::{}", enrolment_id, timestamp_ms)
    }

    /// Map to the plain-value DTO handed to frontends.
    pub fn to_entry(&self) -> CoverageAuditEntry {
        CoverageAuditEntry {
            id: self.id.clone(),
            enrolment_id: self.enrolment_id.clone(),
            reason: self.reason.as_str().to_string(),
            previous_paid_through: self.previous_paid_through.map(|d| d.to_string()),
            next_paid_through: self.next_paid_through.map(|d| d.to_string()),
            actor: self.actor.clone(),
            created_at: self.created_at.clone(),
        }
    }
}
