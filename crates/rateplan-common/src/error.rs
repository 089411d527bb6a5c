//! Error types for Rateplan
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

use crate::types::coverage::{CoverageTier, UsState};

/// Result type alias using RateplanError
pub type Result<T> = std::result::Result<T, RateplanError>;

/// Unified error type for Rateplan operations
#[derive(Debug, Error)]
pub enum RateplanError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by the pricing engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Unknown coverage tier: {0}")]
    UnknownCoverageTier(String),
}

/// Invariant violations when building a pricing profile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Missing base rate for coverage tier: {0}")]
    MissingCoverageTier(CoverageTier),

    #[error("Duplicate adjustment name: {0}")]
    DuplicateAdjustment(String),

    #[error("Profile holds more than {0} adjustments")]
    TooManyAdjustments(usize),
}

/// Errors from profile and quote stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No pricing profile for state: {0}")]
    ProfileNotFound(UsState),

    #[error("Pricing profile not found: {0}")]
    ProfileIdNotFound(u64),

    #[error("Pricing profile already exists for state: {0}")]
    ProfileExists(UsState),

    #[error("Quote not found: {0}")]
    QuoteNotFound(u64),

    #[error("Profile update rejected: {0}")]
    Rejected(#[from] ProfileError),
}

/// Rejections produced while validating raw pricing or quote payloads.
///
/// Display strings are part of the HTTP contract and are returned verbatim after
/// `Data formated incorrectly: `.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("invalid state")]
    InvalidState,

    #[error("coverage_type_prices[coverage_name]")]
    CoverageName,

    #[error("coverage_type_prices[value]")]
    CoverageValue,

    #[error("extras key missing, ensure you have name, type, and value")]
    ExtraKeyMissing,

    #[error("extras[type]")]
    ExtraType,

    #[error("extras[value]")]
    ExtraValue,

    #[error("extras[name] duplicated: {0}")]
    DuplicateExtra(String),

    #[error("extras must not hold more than {0} entries")]
    TooManyExtras(usize),

    #[error("tax should be a float")]
    Tax,

    #[error("missing quote key")]
    MissingQuoteKey,

    #[error("invalid coverage_type")]
    InvalidCoverageType,

    #[error("extras[selection] requires a string name and a boolean value")]
    Selection,
}

impl From<ProfileError> for ValidationError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::MissingCoverageTier(_) => ValidationError::CoverageName,
            ProfileError::DuplicateAdjustment(name) => ValidationError::DuplicateExtra(name),
            ProfileError::TooManyAdjustments(max) => ValidationError::TooManyExtras(max),
        }
    }
}
