//! # Billing Engine
//!
//! Coverage and proration core of the swim school tracker: converts "this
//! student is enrolled in recurring weekly classes and has paid for N
//! sessions" into an exact calendar date through which they remain covered,
//! and keeps that date correct as class schedules, holidays and plans change
//! underneath an active enrolment.
//!
//! The engine exposes no network surface. Route handlers and workflow code
//! call into [`Backend`] (or construct the services over their own
//! [`storage::traits::Connection`] implementation) and decide themselves
//! when a recompute or proration should run.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

pub mod domain;
pub mod storage;

pub use domain::calendar::{CalendarError, DayKey, WeekdayIndex, REFERENCE_TZ};
pub use storage::csv::CsvConnection;

/// Main backend struct that wires the billing services over one storage
/// connection.
pub struct Backend {
    pub coverage_service: domain::CoverageService<CsvConnection>,
    pub proration_service: domain::ProrationService,
    pub enrolment_repository: storage::csv::EnrolmentRepository,
    pub plan_repository: storage::csv::PlanRepository,
    pub holiday_repository: storage::csv::HolidayRepository,
}

impl Backend {
    /// Create a backend over a file-based data directory.
    pub fn new(data_directory: impl AsRef<Path>) -> Result<Self> {
        let connection = Arc::new(CsvConnection::new(data_directory)?);

        use storage::traits::Connection;
        let coverage_service = domain::CoverageService::new(connection.clone());
        let proration_service = domain::ProrationService::new();
        let enrolment_repository = connection.create_enrolment_repository();
        let plan_repository = connection.create_plan_repository();
        let holiday_repository = connection.create_holiday_repository();

        Ok(Backend {
            coverage_service,
            proration_service,
            enrolment_repository,
            plan_repository,
            holiday_repository,
        })
    }
}
