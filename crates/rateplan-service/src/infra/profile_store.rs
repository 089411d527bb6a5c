//! Pricing profile storage
//!
//! One profile per state, addressed by state or by a sequential id.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rateplan_common::{
    Adjustment, CoverageTier, PricingProfile, StoreError, UpsertOutcome, UsState,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// A stored profile with its record metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredProfile {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: PricingProfile,
}

/// Trait for pricing profile storage backends
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Snapshot of the profile for a state
    async fn get(&self, state: UsState) -> Result<StoredProfile, StoreError>;

    /// Snapshot of the profile with the given id
    async fn get_by_id(&self, id: u64) -> Result<StoredProfile, StoreError>;

    /// All profiles ordered by id
    async fn list(&self) -> Vec<StoredProfile>;

    /// Store a profile for a state that has none yet
    async fn insert(&self, profile: PricingProfile) -> Result<u64, StoreError>;

    /// Store a profile, replacing the state's existing one while keeping its id
    async fn upsert(&self, profile: PricingProfile) -> u64;

    /// Replace one tier's base rate
    async fn patch_base_rate(
        &self,
        state: UsState,
        tier: CoverageTier,
        rate: Decimal,
    ) -> Result<(), StoreError>;

    /// Add the adjustment if its name is new, otherwise update kind and magnitude.
    ///
    /// Adding to a full profile fails with [`StoreError::Rejected`].
    async fn upsert_adjustment(
        &self,
        state: UsState,
        adjustment: Adjustment,
    ) -> Result<UpsertOutcome, StoreError>;
}

/// In-memory storage implementation
///
/// Uses DashMap so updates lock only the state being changed.
pub struct InMemoryProfileStore {
    /// Profiles by state
    profiles: DashMap<UsState, StoredProfile>,

    /// Next record id
    next_id: AtomicU64,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn record(&self, profile: PricingProfile) -> StoredProfile {
        StoredProfile {
            id: self.allocate_id(),
            created_at: Utc::now(),
            profile,
        }
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, state: UsState) -> Result<StoredProfile, StoreError> {
        self.profiles
            .get(&state)
            .map(|p| p.clone())
            .ok_or(StoreError::ProfileNotFound(state))
    }

    async fn get_by_id(&self, id: u64) -> Result<StoredProfile, StoreError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.clone())
            .ok_or(StoreError::ProfileIdNotFound(id))
    }

    async fn list(&self) -> Vec<StoredProfile> {
        let mut profiles: Vec<StoredProfile> = self.profiles.iter().map(|p| p.clone()).collect();
        profiles.sort_by_key(|p| p.id);
        profiles
    }

    async fn insert(&self, profile: PricingProfile) -> Result<u64, StoreError> {
        let state = profile.state;
        match self.profiles.entry(state) {
            Entry::Occupied(_) => Err(StoreError::ProfileExists(state)),
            Entry::Vacant(slot) => {
                let stored = self.record(profile);
                let id = stored.id;
                slot.insert(stored);
                info!(state = %state, id, "Pricing profile created");
                Ok(id)
            }
        }
    }

    async fn upsert(&self, profile: PricingProfile) -> u64 {
        let state = profile.state;
        match self.profiles.entry(state) {
            Entry::Occupied(mut slot) => {
                let stored = slot.get_mut();
                stored.profile = profile;
                debug!(state = %state, id = stored.id, "Pricing profile replaced");
                stored.id
            }
            Entry::Vacant(slot) => {
                let stored = self.record(profile);
                let id = stored.id;
                slot.insert(stored);
                info!(state = %state, id, "Pricing profile created");
                id
            }
        }
    }

    async fn patch_base_rate(
        &self,
        state: UsState,
        tier: CoverageTier,
        rate: Decimal,
    ) -> Result<(), StoreError> {
        let mut stored = self
            .profiles
            .get_mut(&state)
            .ok_or(StoreError::ProfileNotFound(state))?;
        stored.profile.set_base_rate(tier, rate);
        debug!(state = %state, tier = %tier, rate = %rate, "Base rate updated");
        Ok(())
    }

    async fn upsert_adjustment(
        &self,
        state: UsState,
        adjustment: Adjustment,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut stored = self
            .profiles
            .get_mut(&state)
            .ok_or(StoreError::ProfileNotFound(state))?;
        let name = adjustment.name.clone();
        let outcome = stored.profile.upsert_adjustment(adjustment)?;
        debug!(state = %state, extra = %name, ?outcome, "Adjustment upserted");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rateplan_common::{
        AdjustmentKind, AdjustmentSet, CoverageRates, ProfileError, MAX_ADJUSTMENTS,
    };
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn create_test_profile(state: UsState) -> PricingProfile {
        PricingProfile::new(
            state,
            dec!(0.01),
            CoverageRates::new(BTreeMap::from([
                (CoverageTier::Basic, dec!(20)),
                (CoverageTier::Premium, dec!(40)),
            ]))
            .unwrap(),
            AdjustmentSet::from_adjustments(vec![Adjustment::multiplicative("flood", dec!(0.02))])
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryProfileStore::new();
        let id = store.insert(create_test_profile(UsState::California)).await.unwrap();

        let by_state = store.get(UsState::California).await.unwrap();
        let by_id = store.get_by_id(id).await.unwrap();
        assert_eq!(by_state, by_id);
        assert_eq!(by_state.profile.tax_rate, dec!(0.01));
    }

    #[tokio::test]
    async fn test_insert_rejects_second_profile_for_state() {
        let store = InMemoryProfileStore::new();
        store.insert(create_test_profile(UsState::Texas)).await.unwrap();

        let err = store.insert(create_test_profile(UsState::Texas)).await.unwrap_err();
        assert_eq!(err, StoreError::ProfileExists(UsState::Texas));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_state() {
        let store = InMemoryProfileStore::new();
        assert_eq!(
            store.get(UsState::NewYork).await.unwrap_err(),
            StoreError::ProfileNotFound(UsState::NewYork)
        );
        assert_eq!(
            store
                .patch_base_rate(UsState::NewYork, CoverageTier::Basic, dec!(1))
                .await
                .unwrap_err(),
            StoreError::ProfileNotFound(UsState::NewYork)
        );
    }

    #[tokio::test]
    async fn test_upsert_keeps_id() {
        let store = InMemoryProfileStore::new();
        let id = store.upsert(create_test_profile(UsState::Texas)).await;

        let mut replacement = create_test_profile(UsState::Texas);
        replacement.tax_rate = dec!(0.005);
        assert_eq!(store.upsert(replacement).await, id);
        assert_eq!(store.get(UsState::Texas).await.unwrap().profile.tax_rate, dec!(0.005));
    }

    #[tokio::test]
    async fn test_patch_base_rate() {
        let store = InMemoryProfileStore::new();
        store.insert(create_test_profile(UsState::California)).await.unwrap();

        store
            .patch_base_rate(UsState::California, CoverageTier::Premium, dec!(45))
            .await
            .unwrap();
        let stored = store.get(UsState::California).await.unwrap();
        assert_eq!(stored.profile.base_rate(CoverageTier::Premium), Some(dec!(45)));
    }

    #[tokio::test]
    async fn test_upsert_adjustment() {
        let store = InMemoryProfileStore::new();
        store.insert(create_test_profile(UsState::California)).await.unwrap();

        let added = store
            .upsert_adjustment(UsState::California, Adjustment::additive("pet", dec!(20)))
            .await
            .unwrap();
        assert_eq!(added, UpsertOutcome::Inserted);

        let updated = store
            .upsert_adjustment(UsState::California, Adjustment::additive("flood", dec!(20)))
            .await
            .unwrap();
        assert_eq!(updated, UpsertOutcome::Updated);

        let stored = store.get(UsState::California).await.unwrap();
        assert_eq!(stored.profile.adjustments.len(), 2);
        let flood = stored.profile.adjustments.get("flood").unwrap();
        assert_eq!(flood.kind, AdjustmentKind::Additive);
        assert_eq!(flood.magnitude, dec!(20));
    }

    #[tokio::test]
    async fn test_upsert_adjustment_rejected_when_full() {
        let store = InMemoryProfileStore::new();
        let mut profile = create_test_profile(UsState::Texas);
        for i in 1..MAX_ADJUSTMENTS {
            profile
                .upsert_adjustment(Adjustment::additive(format!("extra{}", i), dec!(1)))
                .unwrap();
        }
        store.insert(profile).await.unwrap();

        let err = store
            .upsert_adjustment(UsState::Texas, Adjustment::additive("fire", dec!(10)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Rejected(ProfileError::TooManyAdjustments(MAX_ADJUSTMENTS))
        );
        let stored = store.get(UsState::Texas).await.unwrap();
        assert!(stored.profile.adjustments.get("fire").is_none());
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_updates() {
        let store = InMemoryProfileStore::new();
        store.insert(create_test_profile(UsState::California)).await.unwrap();

        let snapshot = store.get(UsState::California).await.unwrap();
        store
            .upsert_adjustment(UsState::California, Adjustment::additive("fire", dec!(10)))
            .await
            .unwrap();

        assert!(snapshot.profile.adjustments.get("fire").is_none());
    }
}
