//! In-memory record stores
//!
//! Stores hand out value snapshots. A snapshot passed to the pricing engine is never
//! touched by later updates; updates go through the store and lock only the record
//! they change.

pub mod profile_store;
pub mod quote_store;

pub use profile_store::{InMemoryProfileStore, ProfileStore, StoredProfile};
pub use quote_store::{InMemoryQuoteStore, QuoteStore};
