//! Quote records and pricing outputs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coverage::{CoverageTier, UsState};

/// Per-quote toggle referencing an adjustment by name.
///
/// Names absent from the profile are ignored at pricing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteExtraSelection {
    pub name: String,
    #[serde(rename = "value", alias = "enabled")]
    pub enabled: bool,
}

impl QuoteExtraSelection {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    pub fn enabled(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn disabled(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

/// Monthly pricing, each field truncated to two fractional digits independently.
///
/// `subtotal + tax` may differ from `total` by a cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Input for creating a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub firstname: String,
    pub lastname: String,
    pub state: UsState,
    #[serde(rename = "coverage_type")]
    pub coverage_tier: CoverageTier,
    #[serde(default)]
    pub extras: Vec<QuoteExtraSelection>,
}

/// A stored quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub firstname: String,
    pub lastname: String,
    pub state: UsState,
    #[serde(rename = "coverage_type")]
    pub coverage_tier: CoverageTier,
    pub extras: Vec<QuoteExtraSelection>,
}

impl Quote {
    pub fn from_new(id: u64, new: NewQuote) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            firstname: new.firstname,
            lastname: new.lastname,
            state: new.state,
            coverage_tier: new.coverage_tier,
            extras: new.extras,
        }
    }

    /// Flip an existing toggle in place, or append a new one.
    ///
    /// Returns `true` when a new toggle was appended.
    pub fn upsert_selection(&mut self, name: &str, enabled: bool) -> bool {
        // Update every toggle with the name so legacy duplicates agree
        let mut found = false;
        for selection in self.extras.iter_mut().filter(|s| s.name == name) {
            selection.enabled = enabled;
            found = true;
        }
        if !found {
            self.extras.push(QuoteExtraSelection::new(name, enabled));
        }
        !found
    }
}

/// Priced quote as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedQuote {
    pub id: u64,
    pub monthly_subtotal: Decimal,
    pub monthly_tax: Decimal,
    pub monthly_total: Decimal,
}

impl PricedQuote {
    pub fn new(id: u64, result: PricingResult) -> Self {
        Self {
            id,
            monthly_subtotal: result.subtotal,
            monthly_tax: result.tax,
            monthly_total: result.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> Quote {
        Quote::from_new(
            1,
            NewQuote {
                firstname: "Name".to_string(),
                lastname: "Lastname".to_string(),
                state: UsState::Texas,
                coverage_tier: CoverageTier::Premium,
                extras: vec![
                    QuoteExtraSelection::enabled("pet"),
                    QuoteExtraSelection::disabled("flood"),
                ],
            },
        )
    }

    #[test]
    fn test_selection_wire_names() {
        let selection: QuoteExtraSelection =
            serde_json::from_str(r#"{"name": "pet", "value": true}"#).unwrap();
        assert!(selection.enabled);

        let selection: QuoteExtraSelection =
            serde_json::from_str(r#"{"name": "pet", "enabled": false}"#).unwrap();
        assert!(!selection.enabled);
    }

    #[test]
    fn test_upsert_selection_updates_existing() {
        let mut quote = quote();
        assert!(!quote.upsert_selection("flood", true));
        assert_eq!(quote.extras.len(), 2);
        assert!(quote.extras[1].enabled);
    }

    #[test]
    fn test_upsert_selection_appends() {
        let mut quote = quote();
        assert!(quote.upsert_selection("fire", true));
        assert_eq!(quote.extras.len(), 3);
        assert_eq!(quote.extras[2], QuoteExtraSelection::enabled("fire"));
    }
}
