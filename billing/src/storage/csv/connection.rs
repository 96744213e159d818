//! File-based storage connection.
//!
//! Owns the data directory layout and the per-enrolment lock registry that
//! scopes coverage recomputes. The layout is:
//!
//! ```text
//! data/
//! ├── enrolments/
//! │   └── {enrolment_id}.yaml
//! ├── plans/
//! │   └── {plan_id}.yaml
//! ├── holidays.csv
//! └── coverage_audit.csv
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use log::info;

use crate::storage::traits::Connection;

use super::audit_repository::AuditRepository;
use super::enrolment_repository::EnrolmentRepository;
use super::holiday_repository::HolidayRepository;
use super::plan_repository::PlanRepository;

/// Connection to a file-based data directory.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// One lock per enrolment ID, created on first use. Lives on the
    /// connection (not in a process-wide static) so independent data
    /// directories never share locks.
    enrolment_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl CsvConnection {
    /// Open (creating if needed) a data directory.
    pub fn new(base_directory: impl AsRef<Path>) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_directory)?;
        info!("Opened billing data directory at {:?}", base_directory);

        Ok(Self {
            base_directory,
            enrolment_locks: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn enrolments_directory(&self) -> PathBuf {
        self.base_directory.join("enrolments")
    }

    pub fn plans_directory(&self) -> PathBuf {
        self.base_directory.join("plans")
    }

    pub fn holidays_file(&self) -> PathBuf {
        self.base_directory.join("holidays.csv")
    }

    pub fn audit_file(&self) -> PathBuf {
        self.base_directory.join("coverage_audit.csv")
    }

    /// File name for a record ID. IDs use `::` separators which stay out of
    /// file names.
    pub fn record_file_name(record_id: &str) -> String {
        format!("{}.yaml", record_id.replace("::", "__"))
    }

    fn lock_for(&self, enrolment_id: &str) -> Result<Arc<Mutex<()>>> {
        let mut registry = self
            .enrolment_locks
            .lock()
            .map_err(|_| anyhow!("Enrolment lock registry poisoned"))?;
        Ok(registry
            .entry(enrolment_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }
}

impl Connection for CsvConnection {
    type EnrolmentRepository = EnrolmentRepository;
    type PlanRepository = PlanRepository;
    type HolidayRepository = HolidayRepository;
    type AuditRepository = AuditRepository;

    fn create_enrolment_repository(&self) -> EnrolmentRepository {
        EnrolmentRepository::new(self.clone())
    }

    fn create_plan_repository(&self) -> PlanRepository {
        PlanRepository::new(self.clone())
    }

    fn create_holiday_repository(&self) -> HolidayRepository {
        HolidayRepository::new(self.clone())
    }

    fn create_audit_repository(&self) -> AuditRepository {
        AuditRepository::new(self.clone())
    }

    fn with_enrolment_lock<T>(
        &self,
        enrolment_id: &str,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let lock = self.lock_for(enrolment_id)?;
        let _guard = lock
            .lock()
            .map_err(|_| anyhow!("Enrolment lock poisoned: {}", enrolment_id))?;
        f()
    }
}

/// Write `content` to `path` atomically: write a temp file, then rename.
pub(super) fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;
    Ok(())
}
