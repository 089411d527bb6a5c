//! Coverage tiers, supported states, and per-tier base rates

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, ProfileError, ValidationError};

/// Named pricing level with its own base rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    Basic,
    Premium,
}

impl CoverageTier {
    /// Every supported tier; a profile must carry a base rate for each
    pub const ALL: [CoverageTier; 2] = [CoverageTier::Basic, CoverageTier::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::Basic => "basic",
            CoverageTier::Premium => "premium",
        }
    }
}

impl fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverageTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| PricingError::UnknownCoverageTier(s.to_string()))
    }
}

/// States with a pricing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsState {
    California,
    NewYork,
    Texas,
}

impl UsState {
    pub const ALL: [UsState; 3] = [UsState::California, UsState::NewYork, UsState::Texas];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsState::California => "california",
            UsState::NewYork => "new_york",
            UsState::Texas => "texas",
        }
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so query strings like `?state=TEXAS` resolve.
impl FromStr for UsState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or(ValidationError::InvalidState)
    }
}

/// Base rate per coverage tier.
///
/// The key set always equals [`CoverageTier::ALL`]; partial maps are rejected on
/// construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<CoverageTier, Decimal>", into = "BTreeMap<CoverageTier, Decimal>")]
pub struct CoverageRates {
    rates: BTreeMap<CoverageTier, Decimal>,
}

impl CoverageRates {
    /// Build from a full tier map
    pub fn new(rates: BTreeMap<CoverageTier, Decimal>) -> Result<Self, ProfileError> {
        if let Some(missing) = CoverageTier::ALL
            .into_iter()
            .find(|tier| !rates.contains_key(tier))
        {
            return Err(ProfileError::MissingCoverageTier(missing));
        }
        Ok(Self { rates })
    }

    /// Base rate for a tier
    pub fn get(&self, tier: CoverageTier) -> Option<Decimal> {
        self.rates.get(&tier).copied()
    }

    /// Replace the base rate of an existing tier, returning the previous value
    pub fn set(&mut self, tier: CoverageTier, rate: Decimal) -> Option<Decimal> {
        self.rates.insert(tier, rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoverageTier, Decimal)> + '_ {
        self.rates.iter().map(|(tier, rate)| (*tier, *rate))
    }
}

impl TryFrom<BTreeMap<CoverageTier, Decimal>> for CoverageRates {
    type Error = ProfileError;

    fn try_from(rates: BTreeMap<CoverageTier, Decimal>) -> Result<Self, Self::Error> {
        Self::new(rates)
    }
}

impl From<CoverageRates> for BTreeMap<CoverageTier, Decimal> {
    fn from(rates: CoverageRates) -> Self {
        rates.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_parse() {
        assert_eq!("basic".parse::<CoverageTier>(), Ok(CoverageTier::Basic));
        assert_eq!(
            "deluxe".parse::<CoverageTier>(),
            Err(PricingError::UnknownCoverageTier("deluxe".to_string()))
        );
        // Tier names are matched exactly
        assert!("Basic".parse::<CoverageTier>().is_err());
    }

    #[test]
    fn test_state_parse_ignores_case() {
        assert_eq!("new_york".parse::<UsState>(), Ok(UsState::NewYork));
        assert_eq!("TEXAS".parse::<UsState>(), Ok(UsState::Texas));
        assert_eq!("nevada".parse::<UsState>(), Err(ValidationError::InvalidState));
    }

    #[test]
    fn test_coverage_rates_require_all_tiers() {
        let partial = BTreeMap::from([(CoverageTier::Premium, dec!(40))]);
        assert_eq!(
            CoverageRates::new(partial),
            Err(ProfileError::MissingCoverageTier(CoverageTier::Basic))
        );

        let full = BTreeMap::from([
            (CoverageTier::Basic, dec!(20)),
            (CoverageTier::Premium, dec!(40)),
        ]);
        let rates = CoverageRates::new(full).unwrap();
        assert_eq!(rates.get(CoverageTier::Premium), Some(dec!(40)));
    }

    #[test]
    fn test_coverage_rates_deserialize_rejects_partial() {
        let err = serde_json::from_str::<CoverageRates>(r#"{"premium": 40}"#);
        assert!(err.is_err());

        let rates: CoverageRates =
            serde_json::from_str(r#"{"basic": 20, "premium": "40.5"}"#).unwrap();
        assert_eq!(rates.get(CoverageTier::Premium), Some(dec!(40.5)));
    }
}
