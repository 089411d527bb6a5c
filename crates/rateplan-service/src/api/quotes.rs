//! Quote handlers

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use rateplan_common::validation::{validate_quote_data, validate_selection};
use rateplan_common::{PricedQuote, Quote};
use serde_json::Value;

use super::{ApiResult, AppState, IdQuery};

pub async fn create_quote(
    State(service): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PricedQuote>)> {
    let Json(payload) = payload?;
    let quote = validate_quote_data(&payload)?;
    let priced = service.create_quote(quote).await?;
    Ok((StatusCode::CREATED, Json(priced)))
}

pub async fn get_quote(
    State(service): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<Quote>> {
    Ok(Json(service.quote(query.id).await?))
}

/// Price a stored quote with the current profile data
pub async fn price_quote(
    State(service): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<PricedQuote>> {
    Ok(Json(service.price_quote(query.id).await?))
}

/// Toggle an extra on a quote and return the new price
pub async fn add_extra(
    State(service): State<AppState>,
    Query(query): Query<IdQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<PricedQuote>> {
    let Json(payload) = payload?;
    let selection = validate_selection(&payload)?;
    Ok(Json(service.toggle_extra(query.id, selection).await?))
}
