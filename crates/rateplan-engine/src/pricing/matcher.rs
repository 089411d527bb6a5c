//! Selection to adjustment matching
//!
//! Resolves quote selections against a profile's adjustments. Matching is exact and
//! case-sensitive. Unknown names and disabled toggles resolve to nothing.

use std::collections::HashMap;

use rateplan_common::{AdjustmentKind, AdjustmentSet, QuoteExtraSelection};
use rust_decimal::Decimal;
use tracing::trace;

/// An adjustment picked by a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedAdjustment {
    /// Position within the profile's adjustment list
    pub position: usize,
    pub kind: AdjustmentKind,
    pub magnitude: Decimal,
}

/// Finds adjustments by name within one profile
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentMatcher<'a> {
    adjustments: &'a AdjustmentSet,
}

impl<'a> AdjustmentMatcher<'a> {
    pub fn new(adjustments: &'a AdjustmentSet) -> Self {
        Self { adjustments }
    }

    /// Find the adjustment named `name`
    pub fn find(&self, name: &str) -> Option<MatchedAdjustment> {
        self.adjustments
            .find(name)
            .map(|(position, adjustment)| MatchedAdjustment {
                position,
                kind: adjustment.kind,
                magnitude: adjustment.magnitude,
            })
    }

    /// Resolve selections to the adjustments they enable, in profile order.
    ///
    /// When a name appears more than once the last toggle wins. Each adjustment is
    /// returned at most once.
    pub fn resolve(&self, selections: &[QuoteExtraSelection]) -> Vec<MatchedAdjustment> {
        let mut toggles: HashMap<&str, bool> = HashMap::with_capacity(selections.len());
        for selection in selections {
            toggles.insert(selection.name.as_str(), selection.enabled);
        }

        let mut matched: Vec<MatchedAdjustment> = toggles
            .into_iter()
            .filter(|&(_, enabled)| enabled)
            .filter_map(|(name, _)| {
                let found = self.find(name);
                if found.is_none() {
                    trace!(extra = name, "Ignoring selection with no matching adjustment");
                }
                found
            })
            .collect();

        matched.sort_by_key(|m| m.position);
        matched
    }
}
