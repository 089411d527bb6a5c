//! Payload validation
//!
//! Checks raw JSON before it becomes a typed [`PricingProfile`] or [`NewQuote`]:
//! - the state is supported
//! - coverage prices name exactly the supported tiers and parse as decimals
//! - every extra carries `name`, `type` (`add` | `multiply`) and a decimal `value`
//! - the tax parses as a decimal
//! - amounts and rates stay within [`MAX_AMOUNT`] and [`MAX_RATE`], and a profile holds
//!   at most [`MAX_ADJUSTMENTS`](crate::decimal::MAX_ADJUSTMENTS) extras
//!
//! The pricing engine trusts these checks and does not repeat them; within these bounds
//! its arithmetic cannot overflow.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use crate::decimal::{parse_decimal, within, MAX_AMOUNT, MAX_RATE};
use crate::error::ValidationError;
use crate::types::adjustment::{Adjustment, AdjustmentKind, AdjustmentSet};
use crate::types::coverage::{CoverageRates, CoverageTier, UsState};
use crate::types::profile::PricingProfile;
use crate::types::quote::{NewQuote, QuoteExtraSelection};

type Validated<T> = std::result::Result<T, ValidationError>;

/// Validate a full pricing profile payload
pub fn validate_pricing_data(data: &Value) -> Validated<PricingProfile> {
    let data = as_object(data)?;

    let state = data
        .get("state")
        .and_then(Value::as_str)
        .and_then(state_exact)
        .ok_or(ValidationError::InvalidState)?;

    let coverage = validate_coverage(data.get("coverage_type_prices").unwrap_or(&Value::Null))?;

    let adjustments = match data.get("extras") {
        None | Some(Value::Null) => AdjustmentSet::new(),
        Some(extras) => validate_extras(extras)?,
    };

    let tax_rate = data
        .get("tax")
        .and_then(parse_decimal)
        .filter(|tax| within(*tax, MAX_RATE))
        .ok_or(ValidationError::Tax)?;

    debug!(state = %state, extras = adjustments.len(), "Pricing data validated");
    Ok(PricingProfile::new(state, tax_rate, coverage, adjustments))
}

/// Coverage prices must name exactly the supported tiers, each with a decimal value
pub fn validate_coverage(data: &Value) -> Validated<CoverageRates> {
    let data = data.as_object().ok_or(ValidationError::CoverageName)?;

    let expected: BTreeSet<&str> = CoverageTier::ALL.iter().map(|t| t.as_str()).collect();
    let given: BTreeSet<&str> = data.keys().map(String::as_str).collect();
    if given != expected {
        return Err(ValidationError::CoverageName);
    }

    let mut rates = BTreeMap::new();
    for tier in CoverageTier::ALL {
        let rate = data
            .get(tier.as_str())
            .and_then(parse_base_rate)
            .ok_or(ValidationError::CoverageValue)?;
        rates.insert(tier, rate);
    }

    Ok(CoverageRates::new(rates)?)
}

/// Validate a partial coverage update.
///
/// Keys that are not supported tiers are skipped; values of supported tiers must parse.
pub fn validate_coverage_patch(data: &Value) -> Validated<Vec<(CoverageTier, Decimal)>> {
    let data = as_object(data)?;

    let mut updates = Vec::new();
    for (key, value) in data {
        let Ok(tier) = key.parse::<CoverageTier>() else {
            debug!(key = %key, "Skipping unknown coverage tier in update");
            continue;
        };
        let rate = parse_base_rate(value).ok_or(ValidationError::CoverageValue)?;
        updates.push((tier, rate));
    }
    Ok(updates)
}

/// Validate an ordered list of extras
pub fn validate_extras(data: &Value) -> Validated<AdjustmentSet> {
    let extras = data.as_array().ok_or(ValidationError::ExtraKeyMissing)?;
    let adjustments = extras
        .iter()
        .map(validate_extra)
        .collect::<Validated<Vec<_>>>()?;
    Ok(AdjustmentSet::from_adjustments(adjustments)?)
}

/// Validate a single extra definition
pub fn validate_extra(data: &Value) -> Validated<Adjustment> {
    let extra = data.as_object().ok_or(ValidationError::ExtraKeyMissing)?;

    let (Some(name), Some(kind), Some(value)) =
        (extra.get("name"), extra.get("type"), extra.get("value"))
    else {
        return Err(ValidationError::ExtraKeyMissing);
    };

    let name = name.as_str().ok_or(ValidationError::ExtraKeyMissing)?;
    let kind = kind
        .as_str()
        .ok_or(ValidationError::ExtraType)?
        .parse::<AdjustmentKind>()?;
    let magnitude = parse_decimal(value)
        .filter(|magnitude| within(*magnitude, kind.max_magnitude()))
        .ok_or(ValidationError::ExtraValue)?;

    Ok(Adjustment::new(name, kind, magnitude))
}

/// Validate a quote creation payload
pub fn validate_quote_data(data: &Value) -> Validated<NewQuote> {
    let data = as_object(data)?;

    let (Some(firstname), Some(lastname), Some(state), Some(coverage_type)) = (
        data.get("firstname"),
        data.get("lastname"),
        data.get("state"),
        data.get("coverage_type"),
    ) else {
        return Err(ValidationError::MissingQuoteKey);
    };

    let (Some(firstname), Some(lastname)) = (firstname.as_str(), lastname.as_str()) else {
        return Err(ValidationError::MissingQuoteKey);
    };

    let state = state
        .as_str()
        .and_then(state_exact)
        .ok_or(ValidationError::InvalidState)?;

    let coverage_tier = coverage_type
        .as_str()
        .and_then(|raw| raw.parse::<CoverageTier>().ok())
        .ok_or(ValidationError::InvalidCoverageType)?;

    let extras = match data.get("extras") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(validate_selection)
            .collect::<Validated<Vec<_>>>()?,
        Some(_) => return Err(ValidationError::Selection),
    };

    Ok(NewQuote {
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        state,
        coverage_tier,
        extras,
    })
}

/// Validate a `{name, value}` toggle
pub fn validate_selection(data: &Value) -> Validated<QuoteExtraSelection> {
    let selection = data.as_object().ok_or(ValidationError::Selection)?;
    let name = selection
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ValidationError::Selection)?;
    let enabled = selection
        .get("value")
        .or_else(|| selection.get("enabled"))
        .and_then(Value::as_bool)
        .ok_or(ValidationError::Selection)?;
    Ok(QuoteExtraSelection::new(name, enabled))
}

fn parse_base_rate(value: &Value) -> Option<Decimal> {
    parse_decimal(value).filter(|rate| within(*rate, MAX_AMOUNT))
}

fn as_object(data: &Value) -> Validated<&Map<String, Value>> {
    data.as_object().ok_or(ValidationError::NotAnObject)
}

// Payload state names are matched exactly
fn state_exact(raw: &str) -> Option<UsState> {
    UsState::ALL.into_iter().find(|state| state.as_str() == raw)
}
