//! Per-state pricing profile

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

use super::adjustment::{Adjustment, AdjustmentSet, UpsertOutcome};
use super::coverage::{CoverageRates, CoverageTier, UsState};

/// Static values used to price quotes for one state.
///
/// Invariants live in the field types: [`CoverageRates`] always covers every tier and
/// [`AdjustmentSet`] never holds two adjustments with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingProfile {
    pub state: UsState,

    /// Tax rate applied to the monthly amount (e.g. `0.01` for 1%)
    #[serde(rename = "tax")]
    pub tax_rate: Decimal,

    #[serde(rename = "coverage_type_prices")]
    pub coverage_base_rates: CoverageRates,

    #[serde(rename = "extras", default)]
    pub adjustments: AdjustmentSet,
}

impl PricingProfile {
    pub fn new(
        state: UsState,
        tax_rate: Decimal,
        coverage_base_rates: CoverageRates,
        adjustments: AdjustmentSet,
    ) -> Self {
        Self {
            state,
            tax_rate,
            coverage_base_rates,
            adjustments,
        }
    }

    /// Base rate for a tier
    pub fn base_rate(&self, tier: CoverageTier) -> Option<Decimal> {
        self.coverage_base_rates.get(tier)
    }

    /// Replace the base rate of a tier
    pub fn set_base_rate(&mut self, tier: CoverageTier, rate: Decimal) {
        self.coverage_base_rates.set(tier, rate);
    }

    /// Add or update an adjustment by name
    pub fn upsert_adjustment(
        &mut self,
        adjustment: Adjustment,
    ) -> Result<UpsertOutcome, ProfileError> {
        self.adjustments.upsert(adjustment)
    }
}
