//! Domain layer of the billing engine.
//!
//! Everything except `coverage_service` is pure and synchronous: no I/O, no
//! shared mutable state, safe to call concurrently without coordination. The
//! coverage service is the single stateful orchestrator and scopes its work
//! with the storage connection's per-enrolment lock.

pub mod calendar;
pub mod commands;
pub mod coverage_service;
pub mod coverage_walker;
pub mod models;
pub mod proration_service;
pub mod schedule;
pub mod weekly_extension;

pub use coverage_service::CoverageService;
pub use proration_service::ProrationService;
