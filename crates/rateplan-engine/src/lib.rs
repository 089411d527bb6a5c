//! # Rateplan Engine
//!
//! Pure pricing evaluation for state-based insurance quotes.
//!
//! ## Pricing Formula
//!
//! ```text
//! amount   = (base + Σ additive) × Π (1 + multiplicative)
//! subtotal = trunc2(amount)
//! tax      = trunc2(amount × tax_rate)
//! total    = trunc2(amount × (1 + tax_rate))
//! ```
//!
//! Where:
//! - base: base rate of the selected coverage tier
//! - additive/multiplicative: enabled adjustments, each in profile order
//! - trunc2: truncation (not rounding) to two fractional digits

pub mod pricing;

pub use pricing::{AdjustmentMatcher, MatchedAdjustment, PricingEngine};
