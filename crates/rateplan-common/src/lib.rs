//! # Rateplan Common
//!
//! Shared types, errors, and input validation for state-based insurance quote pricing.
//!
//! ## Core Types
//!
//! - [`PricingProfile`]: per-state base rates, tax rate, and ordered adjustments
//! - [`Adjustment`]/[`AdjustmentSet`]: named additive or multiplicative price modifiers
//! - [`QuoteExtraSelection`]: per-quote toggle referencing an adjustment by name
//! - [`PricingResult`]: truncated monthly subtotal, tax, and total
//!
//! ## Money
//!
//! All amounts are [`rust_decimal::Decimal`]. Outputs are truncated (never rounded) to
//! [`MONEY_SCALE`] fractional digits by [`decimal::truncate2`].

pub mod decimal;
pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use decimal::{truncate2, MAX_ADJUSTMENTS, MAX_AMOUNT, MAX_RATE, MONEY_SCALE};
pub use error::{
    PricingError, ProfileError, RateplanError, Result, StoreError, ValidationError,
};
pub use types::{
    adjustment::{Adjustment, AdjustmentKind, AdjustmentSet, UpsertOutcome},
    coverage::{CoverageRates, CoverageTier, UsState},
    profile::PricingProfile,
    quote::{NewQuote, PricedQuote, PricingResult, Quote, QuoteExtraSelection},
};
