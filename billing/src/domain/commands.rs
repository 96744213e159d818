//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. A REST or desktop layer is responsible for
//! mapping the public DTOs defined in the `shared` crate to these internal
//! types.

pub mod coverage {
    use shared::CoverageReason;

    use crate::domain::calendar::{DayKey, WeekdayIndex};

    /// Input for recomputing an enrolment's paid-through date.
    #[derive(Debug, Clone)]
    pub struct RecomputeCoverageCommand {
        pub enrolment_id: String,
        pub reason: CoverageReason,
        /// Staff member (or system job) that triggered the recompute.
        pub actor: Option<String>,
        /// Weekday assignment in effect while the entitlement accrued.
        ///
        /// The class-reassignment workflow passes the pre-edit weekdays here
        /// so paid sessions are counted under the schedule they were bought
        /// against. `None` means the current assignment also covers the
        /// accrual period (holiday and invoice triggers).
        pub previous_weekdays: Option<Vec<WeekdayIndex>>,
    }

    impl RecomputeCoverageCommand {
        /// Command for triggers that did not change the schedule.
        pub fn new(enrolment_id: impl Into<String>, reason: CoverageReason) -> Self {
            Self {
                enrolment_id: enrolment_id.into(),
                reason,
                actor: None,
                previous_weekdays: None,
            }
        }

        /// Map the public request DTO into a domain command.
        pub fn from_request(
            request: shared::RecomputeCoverageRequest,
        ) -> Result<Self, String> {
            let reason = CoverageReason::parse(&request.reason)?;
            Ok(Self {
                enrolment_id: request.enrolment_id,
                reason,
                actor: request.actor,
                previous_weekdays: None,
            })
        }
    }

    /// Result of a recompute whose preconditions all held.
    #[derive(Debug, Clone)]
    pub struct RecomputeCoverageResult {
        pub enrolment_id: String,
        pub previous_paid_through: Option<DayKey>,
        pub new_paid_through: Option<DayKey>,
        /// Sessions the enrolment had purchased, derived for this pass.
        pub entitlement_sessions: u32,
        pub changed: bool,
    }

    impl RecomputeCoverageResult {
        /// Map to the plain-value response DTO.
        pub fn to_response(&self) -> shared::RecomputeCoverageResponse {
            shared::RecomputeCoverageResponse {
                enrolment_id: self.enrolment_id.clone(),
                previous_paid_through: self.previous_paid_through.map(|d| d.to_string()),
                new_paid_through: self.new_paid_through.map(|d| d.to_string()),
                recomputed: true,
            }
        }
    }

}

pub mod plan_change {
    use crate::domain::calendar::{DayKey, WeekdayIndex};
    use crate::domain::models::plan::Plan;

    /// Input for converting remaining coverage across a plan change.
    #[derive(Debug, Clone)]
    pub struct PlanChangeProrationCommand {
        /// Day the new plan takes effect.
        pub effective_day: DayKey,
        pub old_paid_through: Option<DayKey>,
        pub old_plan: Plan,
        pub new_plan: Plan,
        /// Weekdays of the destination schedule, used to snap class-billed
        /// coverage onto an actual class day.
        pub destination_weekdays: Vec<WeekdayIndex>,
    }
}
