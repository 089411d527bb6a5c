//! Quote pricing service
//!
//! Ties the profile and quote stores to the pricing engine. Every price is computed
//! from snapshots taken at call time, so profile edits show up on the next request.

use std::sync::Arc;

use rateplan_common::{
    Adjustment, CoverageTier, NewQuote, PricedQuote, PricingProfile, Quote,
    QuoteExtraSelection, Result, UpsertOutcome, UsState,
};
use rateplan_engine::PricingEngine;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::infra::{
    InMemoryProfileStore, InMemoryQuoteStore, ProfileStore, QuoteStore, StoredProfile,
};

/// Rateplan service
pub struct RateplanService {
    /// Pricing profiles, one per state
    pub profiles: Arc<dyn ProfileStore>,
    /// Stored quotes
    pub quotes: Arc<dyn QuoteStore>,
    engine: PricingEngine,
}

impl RateplanService {
    pub fn new(profiles: Arc<dyn ProfileStore>, quotes: Arc<dyn QuoteStore>) -> Self {
        Self {
            profiles,
            quotes,
            engine: PricingEngine::new(),
        }
    }

    /// Service backed by empty in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryProfileStore::new()),
            Arc::new(InMemoryQuoteStore::new()),
        )
    }

    /// Store a validated profile; fails when the state already has one
    pub async fn create_profile(&self, profile: PricingProfile) -> Result<StoredProfile> {
        let state = profile.state;
        let id = self.profiles.insert(profile).await?;
        info!(state = %state, id, "Pricing profile registered");
        Ok(self.profiles.get_by_id(id).await?)
    }

    pub async fn profile(&self, id: u64) -> Result<StoredProfile> {
        Ok(self.profiles.get_by_id(id).await?)
    }

    pub async fn profiles(&self) -> Vec<StoredProfile> {
        self.profiles.list().await
    }

    /// Apply base rate updates to a state's profile
    pub async fn patch_coverage(
        &self,
        state: UsState,
        updates: &[(CoverageTier, Decimal)],
    ) -> Result<StoredProfile> {
        // Surface a missing state even when there is nothing to update
        self.profiles.get(state).await?;
        for (tier, rate) in updates {
            self.profiles.patch_base_rate(state, *tier, *rate).await?;
        }
        Ok(self.profiles.get(state).await?)
    }

    pub async fn upsert_adjustment(
        &self,
        state: UsState,
        adjustment: Adjustment,
    ) -> Result<(UpsertOutcome, StoredProfile)> {
        let outcome = self.profiles.upsert_adjustment(state, adjustment).await?;
        Ok((outcome, self.profiles.get(state).await?))
    }

    /// Price a quote and store it.
    ///
    /// The quote is only stored once it has been priced against its state's profile.
    #[instrument(skip(self, quote), fields(state = %quote.state, tier = %quote.coverage_tier))]
    pub async fn create_quote(&self, quote: NewQuote) -> Result<PricedQuote> {
        let stored = self.profiles.get(quote.state).await?;
        let result = self
            .engine
            .evaluate_tier(&stored.profile, quote.coverage_tier, &quote.extras)?;
        let quote = self.quotes.create(quote).await;
        Ok(PricedQuote::new(quote.id, result))
    }

    pub async fn quote(&self, id: u64) -> Result<Quote> {
        Ok(self.quotes.get(id).await?)
    }

    /// Price a stored quote against the current profile for its state
    pub async fn price_quote(&self, id: u64) -> Result<PricedQuote> {
        let quote = self.quotes.get(id).await?;
        let stored = self.profiles.get(quote.state).await?;
        self.price(&stored.profile, &quote)
    }

    /// Set a toggle on a quote and return its new price
    pub async fn toggle_extra(&self, id: u64, selection: QuoteExtraSelection) -> Result<PricedQuote> {
        let quote = self
            .quotes
            .upsert_selection(id, &selection.name, selection.enabled)
            .await?;
        let stored = self.profiles.get(quote.state).await?;
        self.price(&stored.profile, &quote)
    }

    fn price(&self, profile: &PricingProfile, quote: &Quote) -> Result<PricedQuote> {
        let result = self
            .engine
            .evaluate_tier(profile, quote.coverage_tier, &quote.extras)?;
        Ok(PricedQuote::new(quote.id, result))
    }
}

impl Default for RateplanService {
    fn default() -> Self {
        Self::in_memory()
    }
}
