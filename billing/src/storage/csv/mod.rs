//! # File-Based Storage Module
//!
//! CSV/YAML storage implementation for the billing engine. It demonstrates
//! that the domain logic is completely storage-agnostic: any backend
//! implementing the traits in `storage::traits` can replace it.
//!
//! Enrolments and plans are per-record YAML documents; holidays and the
//! append-only coverage audit log are CSV row files. All full-file writes go
//! through a temp-file-then-rename step.

pub mod audit_repository;
pub mod connection;
pub mod enrolment_repository;
pub mod holiday_repository;
pub mod plan_repository;

#[cfg(test)]
pub mod test_utils;

pub use audit_repository::AuditRepository;
pub use connection::CsvConnection;
pub use enrolment_repository::EnrolmentRepository;
pub use holiday_repository::HolidayRepository;
pub use plan_repository::PlanRepository;
