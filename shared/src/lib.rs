use serde::{Deserialize, Serialize};
use std::fmt;

/// How a plan prices its coverage unit.
///
/// Weekly plans sell a fixed number of sessions per week; per-class plans
/// sell individual class occurrences; block plans sell fixed-size bundles
/// of classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingKind {
    Weekly,
    PerClass,
    Block,
}

impl BillingKind {
    /// True for plans billed per class occurrence (per-class and block).
    pub fn is_class_billed(&self) -> bool {
        matches!(self, BillingKind::PerClass | BillingKind::Block)
    }
}

impl fmt::Display for BillingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BillingKind::Weekly => "weekly",
            BillingKind::PerClass => "per_class",
            BillingKind::Block => "block",
        };
        write!(f, "{}", name)
    }
}

/// Why a coverage recompute was triggered.
///
/// Informational only - the recompute algorithm behaves identically for
/// every reason. Recorded on each coverage audit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageReason {
    HolidayAdded,
    HolidayRemoved,
    HolidayUpdated,
    ClassChanged,
    PlanChanged,
    InvoiceApplied,
}

impl CoverageReason {
    /// Stable wire/storage name for the reason code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageReason::HolidayAdded => "HOLIDAY_ADDED",
            CoverageReason::HolidayRemoved => "HOLIDAY_REMOVED",
            CoverageReason::HolidayUpdated => "HOLIDAY_UPDATED",
            CoverageReason::ClassChanged => "CLASS_CHANGED",
            CoverageReason::PlanChanged => "PLAN_CHANGED",
            CoverageReason::InvoiceApplied => "INVOICE_APPLIED",
        }
    }

    /// Parse a stored reason code name back into the enum.
    pub fn parse(value: &str) -> Result<CoverageReason, String> {
        match value {
            "HOLIDAY_ADDED" => Ok(CoverageReason::HolidayAdded),
            "HOLIDAY_REMOVED" => Ok(CoverageReason::HolidayRemoved),
            "HOLIDAY_UPDATED" => Ok(CoverageReason::HolidayUpdated),
            "CLASS_CHANGED" => Ok(CoverageReason::ClassChanged),
            "PLAN_CHANGED" => Ok(CoverageReason::PlanChanged),
            "INVOICE_APPLIED" => Ok(CoverageReason::InvoiceApplied),
            other => Err(format!("Unknown coverage reason: {}", other)),
        }
    }
}

impl fmt::Display for CoverageReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priced-out view of a block plan purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPricingQuote {
    /// Total price for the effective block, in cents.
    pub total_cents: i64,
    /// Price of a single class within the block, in cents.
    pub per_class_price_cents: i64,
    /// Number of classes actually purchased (custom length when set).
    pub effective_block_length: u32,
}

/// Request to recompute an enrolment's paid-through date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeCoverageRequest {
    pub enrolment_id: String,
    /// One of the CoverageReason wire names.
    pub reason: String,
    /// Staff member (or system) that triggered the recompute.
    pub actor: Option<String>,
}

/// Response after a coverage recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeCoverageResponse {
    pub enrolment_id: String,
    /// Paid-through date before the recompute (ISO 8601, YYYY-MM-DD).
    pub previous_paid_through: Option<String>,
    /// Paid-through date after the recompute (ISO 8601, YYYY-MM-DD).
    pub new_paid_through: Option<String>,
    /// False when a precondition made the recompute a no-op.
    pub recomputed: bool,
}

/// One row of an enrolment's coverage audit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageAuditEntry {
    pub id: String,
    pub enrolment_id: String,
    pub reason: String,
    pub previous_paid_through: Option<String>, // ISO 8601 date
    pub next_paid_through: Option<String>,     // ISO 8601 date
    pub actor: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
}
