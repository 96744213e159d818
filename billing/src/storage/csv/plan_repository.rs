//! # Plan Repository
//!
//! Per-plan YAML documents under `plans/`, same atomic write pattern as the
//! enrolment repository.

use std::path::PathBuf;

use anyhow::Result;
use log::{debug, info};

use crate::domain::models::plan::Plan;
use crate::storage::traits::PlanStorage;

use super::connection::{write_atomically, CsvConnection};

#[derive(Clone)]
pub struct PlanRepository {
    connection: CsvConnection,
}

impl PlanRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn plan_path(&self, plan_id: &str) -> PathBuf {
        self.connection
            .plans_directory()
            .join(CsvConnection::record_file_name(plan_id))
    }
}

impl PlanStorage for PlanRepository {
    fn store_plan(&self, plan: &Plan) -> Result<()> {
        let directory = self.connection.plans_directory();
        if !directory.exists() {
            std::fs::create_dir_all(&directory)?;
        }

        let path = self.plan_path(&plan.id);
        let yaml_content = serde_yaml::to_string(plan)?;
        write_atomically(&path, &yaml_content)?;

        debug!("Saved plan '{}' to {:?}", plan.id, path);
        info!("Stored plan '{}' ({})", plan.id, plan.billing);
        Ok(())
    }

    fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>> {
        let path = self.plan_path(plan_id);
        if !path.exists() {
            return Ok(None);
        }

        let yaml_content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_yaml::from_str::<Plan>(&yaml_content)?))
    }

    fn list_plans(&self) -> Result<Vec<Plan>> {
        let directory = self.connection.plans_directory();
        let mut plans = Vec::new();

        if !directory.exists() {
            return Ok(plans);
        }

        for entry in std::fs::read_dir(&directory)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let yaml_content = std::fs::read_to_string(&path)?;
            plans.push(serde_yaml::from_str::<Plan>(&yaml_content)?);
        }

        plans.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{test_connection, weekly_plan};

    #[test]
    fn test_store_and_get_plan() {
        let (connection, _temp_dir) = test_connection();
        let repo = PlanRepository::new(connection);
        let plan = weekly_plan(3000, 2);

        repo.store_plan(&plan).unwrap();

        let loaded = repo.get_plan(&plan.id).unwrap().unwrap();
        assert_eq!(loaded, plan);
        assert!(repo.get_plan("plan::missing").unwrap().is_none());
    }

    #[test]
    fn test_list_plans() {
        let (connection, _temp_dir) = test_connection();
        let repo = PlanRepository::new(connection);

        let mut weekly = weekly_plan(3000, 2);
        weekly.id = "plan::weekly".to_string();
        let mut other = weekly_plan(4500, 3);
        other.id = "plan::other".to_string();

        repo.store_plan(&weekly).unwrap();
        repo.store_plan(&other).unwrap();

        let plans = repo.list_plans().unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].id, "plan::other");
        assert_eq!(plans[1].id, "plan::weekly");
    }
}
