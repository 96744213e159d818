//! # Holiday Repository
//!
//! All holiday ranges live in a single `holidays.csv` file. Mutations
//! rewrite the whole file atomically; the file stays small (a school year
//! has a handful of closures).

use anyhow::Result;
use log::{debug, info};

use crate::domain::calendar::DayKey;
use crate::domain::models::holiday::HolidayRange;
use crate::storage::traits::HolidayStorage;

use super::connection::{write_atomically, CsvConnection};

#[derive(Clone)]
pub struct HolidayRepository {
    connection: CsvConnection,
}

impl HolidayRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_all(&self) -> Result<Vec<HolidayRange>> {
        let path = self.connection.holidays_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut holidays = Vec::new();
        for record in reader.deserialize() {
            holidays.push(record?);
        }
        Ok(holidays)
    }

    fn write_all(&self, holidays: &[HolidayRange]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for holiday in holidays {
            writer.serialize(holiday)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush holidays CSV: {}", e))?;
        let content = String::from_utf8(bytes)?;
        write_atomically(&self.connection.holidays_file(), &content)?;
        debug!("Rewrote holidays file with {} ranges", holidays.len());
        Ok(())
    }
}

impl HolidayStorage for HolidayRepository {
    fn store_holiday(&self, holiday: &HolidayRange) -> Result<()> {
        let mut holidays = self.read_all()?;
        match holidays.iter_mut().find(|h| h.id == holiday.id) {
            Some(existing) => *existing = holiday.clone(),
            None => holidays.push(holiday.clone()),
        }
        self.write_all(&holidays)?;
        info!(
            "Stored holiday '{}' ({} to {})",
            holiday.id, holiday.start_day, holiday.end_day
        );
        Ok(())
    }

    fn delete_holiday(&self, holiday_id: &str) -> Result<bool> {
        let mut holidays = self.read_all()?;
        let before = holidays.len();
        holidays.retain(|h| h.id != holiday_id);

        if holidays.len() == before {
            debug!("No holiday '{}' found to delete", holiday_id);
            return Ok(false);
        }

        self.write_all(&holidays)?;
        info!("Deleted holiday '{}'", holiday_id);
        Ok(true)
    }

    fn list_holidays(&self) -> Result<Vec<HolidayRange>> {
        let mut holidays = self.read_all()?;
        holidays.sort_by(|a, b| a.start_day.cmp(&b.start_day));
        Ok(holidays)
    }

    fn ranges_overlapping(&self, start: &DayKey, end: &DayKey) -> Result<Vec<HolidayRange>> {
        let mut holidays = self.read_all()?;
        holidays.retain(|h| h.overlaps(start, end));
        holidays.sort_by(|a, b| a.start_day.cmp(&b.start_day));
        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{holiday, test_connection};

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    #[test]
    fn test_store_and_list_holidays() {
        let (connection, _temp_dir) = test_connection();
        let repo = HolidayRepository::new(connection);

        repo.store_holiday(&holiday("holiday::2", "2026-03-10", "2026-03-12"))
            .unwrap();
        repo.store_holiday(&holiday("holiday::1", "2026-01-27", "2026-01-27"))
            .unwrap();

        let listed = repo.list_holidays().unwrap();
        assert_eq!(listed.len(), 2);
        // Sorted by start day, not insertion order.
        assert_eq!(listed[0].id, "holiday::1");
        assert_eq!(listed[1].id, "holiday::2");
    }

    #[test]
    fn test_store_overwrites_same_id() {
        let (connection, _temp_dir) = test_connection();
        let repo = HolidayRepository::new(connection);

        repo.store_holiday(&holiday("holiday::1", "2026-01-27", "2026-01-27"))
            .unwrap();
        repo.store_holiday(&holiday("holiday::1", "2026-01-27", "2026-01-30"))
            .unwrap();

        let listed = repo.list_holidays().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].end_day, day("2026-01-30"));
    }

    #[test]
    fn test_delete_holiday() {
        let (connection, _temp_dir) = test_connection();
        let repo = HolidayRepository::new(connection);

        repo.store_holiday(&holiday("holiday::1", "2026-01-27", "2026-01-27"))
            .unwrap();

        assert!(repo.delete_holiday("holiday::1").unwrap());
        assert!(!repo.delete_holiday("holiday::1").unwrap());
        assert!(repo.list_holidays().unwrap().is_empty());
    }

    #[test]
    fn test_ranges_overlapping_window() {
        let (connection, _temp_dir) = test_connection();
        let repo = HolidayRepository::new(connection);

        repo.store_holiday(&holiday("holiday::jan", "2026-01-26", "2026-01-28"))
            .unwrap();
        repo.store_holiday(&holiday("holiday::jul", "2026-07-01", "2026-07-07"))
            .unwrap();

        let overlapping = repo
            .ranges_overlapping(&day("2026-01-01"), &day("2026-03-31"))
            .unwrap();
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].id, "holiday::jan");

        let none = repo
            .ranges_overlapping(&day("2026-02-01"), &day("2026-02-28"))
            .unwrap();
        assert!(none.is_empty());
    }
}
