//! # Rateplan Service
//!
//! HTTP service pricing state-based insurance quotes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 axum Router                   │
//! │   /api/pricing_params/*      /api/quote/*     │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────┴───────────────────────┐
//! │               RateplanService                 │
//! │  ┌──────────────┐  ┌────────────┐  ┌───────┐  │
//! │  │ ProfileStore │  │ QuoteStore │  │Engine │  │
//! │  └──────────────┘  └────────────┘  └───────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Profiles are seeded at start-up from an embedded JSON seed covering every
//! supported state.

pub mod api;
pub mod config;
pub mod infra;
pub mod seed;
pub mod service;

pub use api::build_router;
pub use config::ServiceConfig;
pub use infra::{InMemoryProfileStore, InMemoryQuoteStore, ProfileStore, QuoteStore, StoredProfile};
pub use seed::{load_seed, seed_profiles, SeedReport};
pub use service::RateplanService;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "rateplan-service";

/// Service version
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;
