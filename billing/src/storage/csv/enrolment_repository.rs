//! # Enrolment Repository
//!
//! Per-enrolment YAML documents under `enrolments/`, written atomically via
//! a temp file and rename.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};

use crate::domain::calendar::DayKey;
use crate::domain::models::enrolment::Enrolment;
use crate::storage::traits::EnrolmentStorage;

use super::connection::{write_atomically, CsvConnection};

#[derive(Clone)]
pub struct EnrolmentRepository {
    connection: CsvConnection,
}

impl EnrolmentRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn enrolment_path(&self, enrolment_id: &str) -> PathBuf {
        self.connection
            .enrolments_directory()
            .join(CsvConnection::record_file_name(enrolment_id))
    }

    fn save(&self, enrolment: &Enrolment) -> Result<()> {
        let directory = self.connection.enrolments_directory();
        if !directory.exists() {
            std::fs::create_dir_all(&directory)?;
        }

        let path = self.enrolment_path(&enrolment.id);
        let yaml_content = serde_yaml::to_string(enrolment)?;
        write_atomically(&path, &yaml_content)?;

        debug!("Saved enrolment '{}' to {:?}", enrolment.id, path);
        Ok(())
    }
}

impl EnrolmentStorage for EnrolmentRepository {
    fn store_enrolment(&self, enrolment: &Enrolment) -> Result<()> {
        self.save(enrolment)?;
        info!("Stored enrolment '{}'", enrolment.id);
        Ok(())
    }

    fn get_enrolment(&self, enrolment_id: &str) -> Result<Option<Enrolment>> {
        let path = self.enrolment_path(enrolment_id);
        if !path.exists() {
            return Ok(None);
        }

        let yaml_content = std::fs::read_to_string(&path)?;
        let enrolment: Enrolment = serde_yaml::from_str(&yaml_content)?;
        Ok(Some(enrolment))
    }

    fn list_enrolments(&self) -> Result<Vec<Enrolment>> {
        let directory = self.connection.enrolments_directory();
        let mut enrolments = Vec::new();

        if !directory.exists() {
            return Ok(enrolments);
        }

        for entry in std::fs::read_dir(&directory)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let yaml_content = std::fs::read_to_string(&path)?;
            enrolments.push(serde_yaml::from_str::<Enrolment>(&yaml_content)?);
        }

        enrolments.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(enrolments)
    }

    fn update_paid_through(
        &self,
        enrolment_id: &str,
        paid_through: Option<DayKey>,
        computed: Option<DayKey>,
    ) -> Result<()> {
        let mut enrolment = self.get_enrolment(enrolment_id)?.ok_or_else(|| {
            anyhow::anyhow!("Cannot update paid-through: enrolment '{}' not found", enrolment_id)
        })?;

        enrolment.paid_through_date = paid_through;
        enrolment.paid_through_date_computed = computed;
        enrolment.updated_at = Utc::now().to_rfc3339();
        self.save(&enrolment)?;

        info!(
            "Updated paid-through for enrolment '{}' to {:?}",
            enrolment_id,
            paid_through.map(|d| d.to_string())
        );
        Ok(())
    }
}
