//! Privileged endpoints: registration, sells, fee intake and burns

use crate::{ApiResult, ApiState};
use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use bloomex_economics::{AllocationBucket, BucketParams, BurnOutcome, FeeQuote, Grant, GrantParams};
use serde::Deserialize;
use tracing::info;

pub fn admin_routes() -> Router<ApiState> {
    Router::new()
        .route("/buckets", post(register_bucket))
        .route("/grants", post(register_grant))
        .route("/sell", post(apply_sell))
        .route("/fees", post(record_fee))
        .route("/burn", post(execute_burn))
}

async fn register_bucket(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(params): Json<BucketParams>,
) -> ApiResult<Json<AllocationBucket>> {
    state.require_admin(&headers)?;
    Ok(Json(state.engine.register_bucket(params)?))
}

async fn register_grant(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(params): Json<GrantParams>,
) -> ApiResult<Json<Grant>> {
    state.require_admin(&headers)?;
    Ok(Json(state.engine.register_grant(params)?))
}

/// Sell request
#[derive(Debug, Deserialize)]
pub struct SellRequest {
    pub amount: u64,
    pub since_unlock_secs: u64,
    pub as_of: Option<u64>,
}

async fn apply_sell(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<SellRequest>,
) -> ApiResult<Json<FeeQuote>> {
    state.require_admin(&headers)?;

    let now = request.as_of.unwrap_or_else(crate::state::now);
    let quote = state
        .engine
        .apply_anti_dump_fee(request.amount, request.since_unlock_secs, now)?;
    Ok(Json(quote))
}

/// Transaction fee intake
#[derive(Debug, Deserialize)]
pub struct FeeRequest {
    pub amount: u64,
}

async fn record_fee(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<FeeRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    state.require_admin(&headers)?;
    state.engine.record_transaction_fee(request.amount);

    Ok(Json(serde_json::json!({
        "status": "success",
        "fees_since_last_burn": state.engine.supply_stats().fees_since_last_burn,
    })))
}

/// Burn request
#[derive(Debug, Default, Deserialize)]
pub struct BurnRequest {
    pub as_of: Option<u64>,
}

async fn execute_burn(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<BurnRequest>,
) -> ApiResult<Json<BurnOutcome>> {
    state.require_admin(&headers)?;

    let now = request.as_of.unwrap_or_else(crate::state::now);
    let outcome = state.engine.execute_burn(now)?;
    info!("Burn requested at {}: {:?}", now, outcome);
    Ok(Json(outcome))
}
