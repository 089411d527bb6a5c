//! Start-up seeding of pricing profiles

use std::path::Path;

use anyhow::{Context, Result};
use rateplan_common::validation::validate_pricing_data;
use rateplan_common::StoreError;
use serde_json::Value;
use tracing::{info, warn};

use crate::infra::ProfileStore;

/// Profiles for every supported state
pub const DEFAULT_SEED: &str = include_str!("../seed/pricing_params.json");

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub existing: usize,
    pub invalid: usize,
}

/// Read the seed file, or the embedded seed when no path is given
pub async fn load_seed(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read seed file {}", path.display()))?,
        None => DEFAULT_SEED.to_string(),
    };
    serde_json::from_str(&raw).context("seed is not valid JSON")
}

/// Insert every valid entry whose state has no profile yet
pub async fn seed_profiles(store: &dyn ProfileStore, seed: &Value) -> Result<SeedReport> {
    let entries = seed
        .as_array()
        .context("seed must be a JSON array of pricing profiles")?;

    let mut report = SeedReport::default();
    for (index, entry) in entries.iter().enumerate() {
        let profile = match validate_pricing_data(entry) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid seed entry");
                report.invalid += 1;
                continue;
            }
        };

        match store.insert(profile).await {
            Ok(_) => report.inserted += 1,
            Err(StoreError::ProfileExists(state)) => {
                info!(state = %state, "Profile already present, seed entry skipped");
                report.existing += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        inserted = report.inserted,
        existing = report.existing,
        invalid = report.invalid,
        "Pricing profiles seeded"
    );
    Ok(report)
}
