//! # Coverage Audit Repository
//!
//! Append-only `coverage_audit.csv`. Rows are only ever appended; the file
//! is the full recompute history of the school.

use std::fs::OpenOptions;

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use shared::CoverageReason;

use crate::domain::calendar::DayKey;
use crate::domain::models::coverage_audit::CoverageAudit;
use crate::storage::traits::CoverageAuditStorage;

use super::connection::CsvConnection;

/// Flat CSV row form of an audit record. Reason codes are stored under
/// their stable wire names.
#[derive(Debug, Serialize, Deserialize)]
struct AuditRow {
    id: String,
    enrolment_id: String,
    reason: String,
    previous_paid_through: Option<DayKey>,
    next_paid_through: Option<DayKey>,
    actor: Option<String>,
    created_at: String,
}

impl AuditRow {
    fn from_audit(audit: &CoverageAudit) -> Self {
        Self {
            id: audit.id.clone(),
            enrolment_id: audit.enrolment_id.clone(),
            reason: audit.reason.as_str().to_string(),
            previous_paid_through: audit.previous_paid_through,
            next_paid_through: audit.next_paid_through,
            actor: audit.actor.clone(),
            created_at: audit.created_at.clone(),
        }
    }

    fn into_audit(self) -> Result<CoverageAudit> {
        let reason = CoverageReason::parse(&self.reason).map_err(anyhow::Error::msg)?;
        Ok(CoverageAudit {
            id: self.id,
            enrolment_id: self.enrolment_id,
            reason,
            previous_paid_through: self.previous_paid_through,
            next_paid_through: self.next_paid_through,
            actor: self.actor,
            created_at: self.created_at,
        })
    }
}

#[derive(Clone)]
pub struct AuditRepository {
    connection: CsvConnection,
}

impl AuditRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

impl CoverageAuditStorage for AuditRepository {
    fn append_audit(&self, audit: &CoverageAudit) -> Result<()> {
        let path = self.connection.audit_file();
        let is_new_file = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new_file)
            .from_writer(file);
        writer.serialize(AuditRow::from_audit(audit))?;
        writer.flush()?;

        debug!(
            "Appended coverage audit '{}' for enrolment '{}'",
            audit.id, audit.enrolment_id
        );
        Ok(())
    }

    fn list_audits(&self, enrolment_id: &str) -> Result<Vec<CoverageAudit>> {
        let path = self.connection.audit_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut audits = Vec::new();
        for record in reader.deserialize::<AuditRow>() {
            let row = record?;
            if row.enrolment_id == enrolment_id {
                audits.push(row.into_audit()?);
            }
        }
        Ok(audits)
    }
}
