//! Domain model for a billing plan.

use serde::{Deserialize, Serialize};
use shared::{BillingKind, BlockPricingQuote};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub billing: BillingKind,
    /// Plan price in cents: per week for weekly plans, per class for
    /// per-class plans, per block for block plans.
    pub price_cents: i64,
    /// Sessions purchased per week (weekly plans).
    pub sessions_per_week: Option<u32>,
    /// Nominal classes per block (block plans).
    pub block_length: Option<u32>,
    /// Override for the number of classes actually sold in a block.
    pub custom_block_length: Option<u32>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl Plan {
    /// Generate a unique plan ID.
    /// Format: plan::<timestamp_ms>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("plan::{}", timestamp_ms)
    }

    fn unit_denominator(&self) -> u32 {
        let denominator = match self.billing {
            BillingKind::Weekly => self.sessions_per_week,
            BillingKind::PerClass | BillingKind::Block => self.block_length,
        };
        denominator.filter(|d| *d > 0).unwrap_or(1)
    }

    /// Whole-cent price of one coverage unit (one class occurrence).
    pub fn unit_price_cents(&self) -> i64 {
        self.price_cents / self.unit_denominator() as i64
    }

    /// Exact unit price used for proration ratios, before cent rounding.
    pub fn unit_price(&self) -> f64 {
        self.price_cents as f64 / self.unit_denominator() as f64
    }

    /// Sessions per week with the weekly default applied.
    pub fn sessions_per_week_or_default(&self) -> u32 {
        self.sessions_per_week.filter(|s| *s > 0).unwrap_or(1)
    }

    /// Price out a block purchase.
    ///
    /// The per-class price always derives from the nominal block length;
    /// the total scales by the custom length when one is set.
    pub fn block_pricing_quote(&self) -> BlockPricingQuote {
        let nominal_length = self.block_length.filter(|l| *l > 0).unwrap_or(1);
        let effective_block_length = self
            .custom_block_length
            .filter(|l| *l > 0)
            .unwrap_or(nominal_length);
        let per_class_price_cents = self.price_cents / nominal_length as i64;

        BlockPricingQuote {
            total_cents: per_class_price_cents * effective_block_length as i64,
            per_class_price_cents,
            effective_block_length,
        }
    }
}
