//! Pricing profile handlers

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use rateplan_common::validation::{
    validate_coverage_patch, validate_extra, validate_pricing_data,
};
use rateplan_common::UsState;
use serde_json::Value;

use super::{ApiError, ApiResult, AppState, IdQuery, StateQuery};
use crate::infra::StoredProfile;

pub async fn get_profile(
    State(service): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<StoredProfile>> {
    Ok(Json(service.profile(query.id).await?))
}

pub async fn list_profiles(State(service): State<AppState>) -> Json<Vec<StoredProfile>> {
    Json(service.profiles().await)
}

pub async fn create_profile(
    State(service): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StoredProfile>)> {
    let Json(payload) = payload?;
    let profile = validate_pricing_data(&payload)?;
    let stored = service.create_profile(profile).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Replace base rates of the tiers named in the body; other keys are ignored
pub async fn update_coverage(
    State(service): State<AppState>,
    Query(query): Query<StateQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StoredProfile>> {
    let state = parse_state(&query.state)?;
    let Json(payload) = payload?;
    let updates = validate_coverage_patch(&payload)?;
    Ok(Json(service.patch_coverage(state, &updates).await?))
}

/// Add an extra to the state's profile, or update the one with the same name
pub async fn upsert_extra(
    State(service): State<AppState>,
    Query(query): Query<StateQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StoredProfile>> {
    let state = parse_state(&query.state)?;
    let Json(payload) = payload?;
    let adjustment = validate_extra(&payload)?;
    let (_, stored) = service.upsert_adjustment(state, adjustment).await?;
    Ok(Json(stored))
}

fn parse_state(raw: &str) -> ApiResult<UsState> {
    raw.parse()
        .map_err(|_| ApiError::UnknownState(raw.to_string()))
}
