//! Core data types for Rateplan

pub mod adjustment;
pub mod coverage;
pub mod profile;
pub mod quote;
