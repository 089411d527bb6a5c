//! Quote storage

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rateplan_common::{NewQuote, Quote, StoreError};
use tracing::debug;

/// Trait for quote storage backends
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Snapshot of a quote
    async fn get(&self, id: u64) -> Result<Quote, StoreError>;

    /// Store a new quote and return it with its assigned id
    async fn create(&self, quote: NewQuote) -> Quote;

    /// Set a toggle on an existing quote, appending it when the name is new
    async fn upsert_selection(&self, id: u64, name: &str, enabled: bool)
        -> Result<Quote, StoreError>;

    /// Number of stored quotes
    async fn count(&self) -> usize;
}

/// In-memory storage implementation
pub struct InMemoryQuoteStore {
    quotes: DashMap<u64, Quote>,
    next_id: AtomicU64,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self {
            quotes: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryQuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn get(&self, id: u64) -> Result<Quote, StoreError> {
        self.quotes
            .get(&id)
            .map(|q| q.clone())
            .ok_or(StoreError::QuoteNotFound(id))
    }

    async fn create(&self, quote: NewQuote) -> Quote {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let quote = Quote::from_new(id, quote);
        self.quotes.insert(id, quote.clone());
        debug!(id, state = %quote.state, tier = %quote.coverage_tier, "Quote created");
        quote
    }

    async fn upsert_selection(
        &self,
        id: u64,
        name: &str,
        enabled: bool,
    ) -> Result<Quote, StoreError> {
        let mut quote = self
            .quotes
            .get_mut(&id)
            .ok_or(StoreError::QuoteNotFound(id))?;
        let appended = quote.upsert_selection(name, enabled);
        debug!(id, extra = name, enabled, appended, "Quote selection upserted");
        Ok(quote.clone())
    }

    async fn count(&self) -> usize {
        self.quotes.len()
    }
}
