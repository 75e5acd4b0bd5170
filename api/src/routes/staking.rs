//! Staking endpoints

use super::AsOfQuery;
use crate::{ApiResult, ApiState};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use bloomex_economics::{constants::DAY, Claimed, PoolStats, StakePosition, StakingApy, Unstaked};
use serde::{Deserialize, Serialize};

pub fn staking_routes() -> Router<ApiState> {
    Router::new()
        .route("/apy", get(get_apy))
        .route("/stats", get(get_stats))
        .route("/positions/{owner}", get(get_position))
        .route("/stake", post(stake))
        .route("/claim", post(claim))
        .route("/unstake", post(unstake))
}

/// Lock length in seconds; very long locks saturate into the top bonus tier
fn lock_period(lock_days: u64) -> u64 {
    lock_days.saturating_mul(DAY)
}

#[derive(Debug, Deserialize)]
pub struct ApyQuery {
    pub amount: u64,
    #[serde(default)]
    pub lock_days: u64,
}

async fn get_apy(
    State(state): State<ApiState>,
    Query(query): Query<ApyQuery>,
) -> ApiResult<Json<StakingApy>> {
    let apy = state
        .engine
        .staking_apy(query.amount, lock_period(query.lock_days))?;
    Ok(Json(apy))
}

async fn get_stats(State(state): State<ApiState>) -> ApiResult<Json<PoolStats>> {
    Ok(Json(state.engine.staking_stats()))
}

#[derive(Debug, Serialize)]
struct PositionResponse {
    #[serde(flatten)]
    position: StakePosition,
    unlocks_at: u64,
    accrued_rewards: u64,
    as_of: u64,
}

async fn get_position(
    State(state): State<ApiState>,
    Path(owner): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<PositionResponse>> {
    let as_of = query.resolve();
    let position = state.engine.stake_position(&owner)?;

    Ok(Json(PositionResponse {
        unlocks_at: position.unlocks_at(),
        accrued_rewards: position.accrued_rewards(as_of),
        position,
        as_of,
    }))
}

/// Stake request
#[derive(Debug, Deserialize)]
pub struct StakeRequest {
    pub owner: String,
    pub amount: u64,
    pub lock_days: u64,
    pub as_of: Option<u64>,
}

/// Staking changes balances on behalf of the owner, so it sits behind the
/// admin token like the other write endpoints.
async fn stake(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<StakeRequest>,
) -> ApiResult<Json<StakePosition>> {
    state.require_admin(&headers)?;

    let now = request.as_of.unwrap_or_else(crate::state::now);
    let position = state.engine.stake(
        &request.owner,
        request.amount,
        lock_period(request.lock_days),
        now,
    )?;
    Ok(Json(position))
}

/// Claim or unstake request
#[derive(Debug, Deserialize)]
pub struct UnstakeRequest {
    pub owner: String,
    pub as_of: Option<u64>,
}

async fn claim(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<UnstakeRequest>,
) -> ApiResult<Json<Claimed>> {
    state.require_admin(&headers)?;

    let now = request.as_of.unwrap_or_else(crate::state::now);
    Ok(Json(state.engine.claim_rewards(&request.owner, now)?))
}

async fn unstake(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<UnstakeRequest>,
) -> ApiResult<Json<Unstaked>> {
    state.require_admin(&headers)?;

    let now = request.as_of.unwrap_or_else(crate::state::now);
    Ok(Json(state.engine.unstake(&request.owner, now)?))
}
