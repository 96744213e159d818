//! Plan-change proration.
//!
//! Moving an enrolment to a different plan mid-coverage converts the time it
//! has already paid for into an equivalent stretch under the new plan's
//! pricing, by unit-price ratio. Cheaper destination units stretch the
//! remaining coverage; pricier ones shrink it.

use log::{info, warn};

use crate::domain::calendar::DayKey;
use crate::domain::commands::plan_change::PlanChangeProrationCommand;
use crate::domain::schedule::next_scheduled_day;

/// Stateless calculator for plan-change conversions.
#[derive(Clone, Default)]
pub struct ProrationService;

impl ProrationService {
    pub fn new() -> Self {
        Self
    }

    /// Convert remaining coverage into an equivalent paid-through date under
    /// the destination plan.
    ///
    /// Returns `None` when there is no prior paid-through date to convert,
    /// or when a class-billed destination has no weekdays to land on. A
    /// non-positive unit price on either side skips proration entirely and
    /// returns the prior date unchanged rather than dividing by zero.
    pub fn compute_prorated_paid_through(
        &self,
        command: PlanChangeProrationCommand,
    ) -> Option<DayKey> {
        let old_paid_through = command.old_paid_through?;

        let remaining_days = command.effective_day.days_until(&old_paid_through).max(0);
        if remaining_days == 0 {
            return Some(old_paid_through);
        }

        let old_unit_price = command.old_plan.unit_price();
        let new_unit_price = command.new_plan.unit_price();
        if old_unit_price <= 0.0 || new_unit_price <= 0.0 {
            warn!(
                "Skipping proration between plans {} and {}: non-positive unit price",
                command.old_plan.id, command.new_plan.id
            );
            return Some(old_paid_through);
        }

        let ratio = old_unit_price / new_unit_price;
        // Fractional days are allowed mid-calculation and truncated to a
        // whole day at the end.
        let prorated_days = (remaining_days as f64 * ratio).trunc() as i64;
        let prorated = command.effective_day.add_days(prorated_days);

        info!(
            "Prorated {} remaining days at ratio {:.4} -> {} ({} to {})",
            remaining_days, ratio, prorated, command.old_plan.id, command.new_plan.id
        );

        if command.new_plan.billing.is_class_billed() {
            // Coverage must land on an actual class day of the destination
            // schedule.
            next_scheduled_day(prorated, &command.destination_weekdays, None, None)
        } else {
            Some(prorated)
        }
    }
}
