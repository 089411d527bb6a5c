//! Pricing module
//!
//! Provides quote evaluation with:
//! - Per-tier base rates
//! - Additive add-ons applied before multiplicative surcharges
//! - Truncation of every reported amount to cents

pub mod engine;
pub mod matcher;

pub use engine::PricingEngine;
pub use matcher::{AdjustmentMatcher, MatchedAdjustment};
