//! Adjustments - named price modifiers attached to a pricing profile
//!
//! An adjustment is either additive (a flat amount added to the base rate) or
//! multiplicative (a surcharge applied as `amount * (1 + magnitude)`).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{MAX_ADJUSTMENTS, MAX_AMOUNT, MAX_RATE};
use crate::error::{ProfileError, ValidationError};

/// How an adjustment combines with the running amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// Flat add-on (`amount += magnitude`)
    #[serde(rename = "add")]
    Additive,
    /// Percentage surcharge (`amount *= 1 + magnitude`)
    #[serde(rename = "multiply")]
    Multiplicative,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Additive => "add",
            AdjustmentKind::Multiplicative => "multiply",
        }
    }

    /// Largest accepted magnitude, in either direction
    pub fn max_magnitude(&self) -> Decimal {
        match self {
            AdjustmentKind::Additive => MAX_AMOUNT,
            AdjustmentKind::Multiplicative => MAX_RATE,
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(AdjustmentKind::Additive),
            "multiply" => Ok(AdjustmentKind::Multiplicative),
            _ => Err(ValidationError::ExtraType),
        }
    }
}

/// A named modifier to price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Name referenced by quote selections (case-sensitive)
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    #[serde(rename = "value")]
    pub magnitude: Decimal,
}

impl Adjustment {
    pub fn new(name: impl Into<String>, kind: AdjustmentKind, magnitude: Decimal) -> Self {
        Self {
            name: name.into(),
            kind,
            magnitude,
        }
    }

    /// Flat add-on
    pub fn additive(name: impl Into<String>, magnitude: Decimal) -> Self {
        Self::new(name, AdjustmentKind::Additive, magnitude)
    }

    /// Percentage surcharge, e.g. `0.10` for +10%
    pub fn multiplicative(name: impl Into<String>, magnitude: Decimal) -> Self {
        Self::new(name, AdjustmentKind::Multiplicative, magnitude)
    }
}

/// Result of [`AdjustmentSet::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Insertion-ordered adjustments, indexed by name.
///
/// Iteration follows insertion order. Updating an existing name keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Adjustment>", into = "Vec<Adjustment>")]
pub struct AdjustmentSet {
    entries: Vec<Adjustment>,
    index: HashMap<String, usize>,
}

impl AdjustmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an ordered list, rejecting repeated names and oversized lists
    pub fn from_adjustments(
        adjustments: impl IntoIterator<Item = Adjustment>,
    ) -> Result<Self, ProfileError> {
        let mut set = Self::new();
        for adjustment in adjustments {
            if set.index.contains_key(&adjustment.name) {
                return Err(ProfileError::DuplicateAdjustment(adjustment.name));
            }
            set.push(adjustment)?;
        }
        Ok(set)
    }

    /// Look up an adjustment by exact name
    pub fn get(&self, name: &str) -> Option<&Adjustment> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    /// Look up an adjustment and its insertion position
    pub fn find(&self, name: &str) -> Option<(usize, &Adjustment)> {
        self.index.get(name).map(|&pos| (pos, &self.entries[pos]))
    }

    /// Add the adjustment if its name is new, otherwise overwrite kind and magnitude.
    ///
    /// Adding fails once the set holds [`MAX_ADJUSTMENTS`]; updates always succeed.
    pub fn upsert(&mut self, adjustment: Adjustment) -> Result<UpsertOutcome, ProfileError> {
        match self.index.get(&adjustment.name) {
            Some(&pos) => {
                let existing = &mut self.entries[pos];
                existing.kind = adjustment.kind;
                existing.magnitude = adjustment.magnitude;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.push(adjustment)?;
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Adjustment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, adjustment: Adjustment) -> Result<(), ProfileError> {
        if self.entries.len() >= MAX_ADJUSTMENTS {
            return Err(ProfileError::TooManyAdjustments(MAX_ADJUSTMENTS));
        }
        self.index.insert(adjustment.name.clone(), self.entries.len());
        self.entries.push(adjustment);
        Ok(())
    }
}

impl TryFrom<Vec<Adjustment>> for AdjustmentSet {
    type Error = ProfileError;

    fn try_from(adjustments: Vec<Adjustment>) -> Result<Self, Self::Error> {
        Self::from_adjustments(adjustments)
    }
}

impl From<AdjustmentSet> for Vec<Adjustment> {
    fn from(set: AdjustmentSet) -> Self {
        set.entries
    }
}

impl<'a> IntoIterator for &'a AdjustmentSet {
    type Item = &'a Adjustment;
    type IntoIter = std::slice::Iter<'a, Adjustment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
