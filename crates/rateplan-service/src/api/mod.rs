//! REST API
//!
//! JSON over HTTP. Decimal amounts are rendered as strings so no precision is lost.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rateplan_common::{RateplanError, StoreError, ValidationError};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::RateplanService;

pub mod pricing_params;
pub mod quotes;

/// Shared handler state
pub type AppState = Arc<RateplanService>;

/// Build the API router
pub fn build_router(service: AppState) -> Router {
    // CORS layer to allow frontend connections from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/pricing_params",
            get(pricing_params::get_profile).post(pricing_params::create_profile),
        )
        .route("/api/pricing_params/get_all", get(pricing_params::list_profiles))
        .route(
            "/api/pricing_params/add_or_update_coverage",
            post(pricing_params::update_coverage),
        )
        .route(
            "/api/pricing_params/add_or_update_extras",
            post(pricing_params::upsert_extra),
        )
        .route("/api/quote", get(quotes::get_quote).post(quotes::create_quote))
        .route("/api/quote/price", get(quotes::price_quote))
        .route("/api/quote/add_extra", post(quotes::add_extra))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": crate::SERVICE_NAME,
        "version": crate::SERVICE_VERSION,
    }))
}

/// `?id=N`
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: u64,
}

/// `?state=S`
#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub state: String,
}

/// Handler error mapped onto an HTTP status
#[derive(Debug)]
pub enum ApiError {
    Rateplan(RateplanError),
    /// Body was not valid JSON
    MalformedBody(String),
    /// State query names no supported state
    UnknownState(String),
}

impl From<RateplanError> for ApiError {
    fn from(err: RateplanError) -> Self {
        Self::Rateplan(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Rateplan(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

fn malformed(detail: impl std::fmt::Display) -> (StatusCode, String) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Data formated incorrectly: {}", detail),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MalformedBody(detail) => malformed(detail),
            Self::UnknownState(state) => (
                StatusCode::NOT_FOUND,
                format!("No pricing profile for state: {}", state),
            ),
            Self::Rateplan(RateplanError::Validation(e)) => malformed(e),
            Self::Rateplan(RateplanError::Pricing(e)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            Self::Rateplan(RateplanError::Store(StoreError::Rejected(e))) => {
                malformed(ValidationError::from(e))
            }
            Self::Rateplan(RateplanError::Store(e @ StoreError::ProfileExists(_))) => {
                (StatusCode::CONFLICT, e.to_string())
            }
            Self::Rateplan(RateplanError::Store(
                e @ (StoreError::ProfileNotFound(_)
                | StoreError::ProfileIdNotFound(_)
                | StoreError::QuoteNotFound(_)),
            )) => (StatusCode::NOT_FOUND, e.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
