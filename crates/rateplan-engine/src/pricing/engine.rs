//! Quote pricing engine
//!
//! Evaluation order is fixed:
//! 1. start from the base rate of the coverage tier
//! 2. add every enabled additive adjustment, in profile order
//! 3. multiply by `1 + magnitude` for every enabled multiplicative adjustment, in
//!    profile order (multipliers compound)
//! 4. truncate subtotal, tax and total independently from the untruncated amount

use rateplan_common::{
    truncate2, AdjustmentKind, CoverageTier, PricingError, PricingProfile, PricingResult,
    QuoteExtraSelection,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::matcher::{AdjustmentMatcher, MatchedAdjustment};

/// Stateless pricing engine.
///
/// Holds no data between calls, so one instance can be shared freely across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Price a tier given by name.
    ///
    /// Fails with [`PricingError::UnknownCoverageTier`] when the name is not a tier the
    /// profile prices.
    #[instrument(level = "debug", skip(self, profile, selections), fields(state = %profile.state))]
    pub fn evaluate(
        &self,
        profile: &PricingProfile,
        coverage_tier: &str,
        selections: &[QuoteExtraSelection],
    ) -> Result<PricingResult, PricingError> {
        let tier = coverage_tier.parse::<CoverageTier>()?;
        self.evaluate_tier(profile, tier, selections)
    }

    /// Price an already-parsed tier
    pub fn evaluate_tier(
        &self,
        profile: &PricingProfile,
        tier: CoverageTier,
        selections: &[QuoteExtraSelection],
    ) -> Result<PricingResult, PricingError> {
        let base = profile
            .base_rate(tier)
            .ok_or_else(|| PricingError::UnknownCoverageTier(tier.to_string()))?;

        let matched = AdjustmentMatcher::new(&profile.adjustments).resolve(selections);
        let amount = Self::apply_adjustments(base, &matched);

        let result = PricingResult {
            subtotal: truncate2(amount),
            tax: truncate2(amount * profile.tax_rate),
            total: truncate2(amount * (Decimal::ONE + profile.tax_rate)),
        };

        debug!(
            tier = %tier,
            applied = matched.len(),
            subtotal = %result.subtotal,
            tax = %result.tax,
            total = %result.total,
            "Quote priced"
        );
        Ok(result)
    }

    /// Additive pass first, then the multiplicative pass; `matched` is in profile order
    fn apply_adjustments(base: Decimal, matched: &[MatchedAdjustment]) -> Decimal {
        let with_addons = matched
            .iter()
            .filter(|m| m.kind == AdjustmentKind::Additive)
            .fold(base, |amount, m| amount + m.magnitude);

        matched
            .iter()
            .filter(|m| m.kind == AdjustmentKind::Multiplicative)
            .fold(with_addons, |amount, m| amount * (Decimal::ONE + m.magnitude))
    }
}
