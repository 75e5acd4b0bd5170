//! Bucket and grant unlock endpoints

use super::AsOfQuery;
use crate::{ApiResult, ApiState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use bloomex_economics::{AllocationBucket, BucketKind, Grant, GrantId, UnlockEvent, VestingKind};
use serde::{Deserialize, Serialize};

/// Register vesting routes
pub fn vesting_routes() -> Router<ApiState> {
    Router::new()
        .route("/buckets", get(list_buckets))
        .route("/buckets/{kind}", get(get_bucket))
        .route("/buckets/{kind}/event", get(get_bucket_event))
        .route("/grants/{id}", get(get_grant))
        .route("/grants/{id}/event", get(get_grant_event))
        .route("/beneficiary/{address}", get(get_beneficiary_grants))
}

#[derive(Debug, Serialize)]
pub struct BucketResponse {
    pub kind: BucketKind,
    pub label: String,
    pub total_amount: u64,
    pub unlocked: u64,
    pub locked: u64,
    pub initial_unlock_pct: u8,
    pub vesting_kind: VestingKind,
    pub cliff_end: u64,
    pub vesting_end: u64,
    pub as_of: u64,
}

impl BucketResponse {
    fn new(bucket: &AllocationBucket, as_of: u64) -> Self {
        let unlocked = bucket.unlocked_at(as_of);
        Self {
            kind: bucket.kind,
            label: bucket.kind.label().to_string(),
            total_amount: bucket.total_amount(),
            unlocked,
            locked: bucket.total_amount() - unlocked,
            initial_unlock_pct: bucket.schedule.initial_unlock_pct,
            vesting_kind: bucket.schedule.kind,
            cliff_end: bucket.schedule.cliff_end(),
            vesting_end: bucket.schedule.end(),
            as_of,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GrantResponse {
    pub id: GrantId,
    pub bucket: BucketKind,
    pub beneficiary: String,
    pub amount: u64,
    pub unlocked: u64,
    pub locked: u64,
    pub start: u64,
    pub vesting_end: u64,
    pub as_of: u64,
}

impl GrantResponse {
    fn new(grant: &Grant, as_of: u64) -> Self {
        let unlocked = grant.unlocked_at(as_of);
        Self {
            id: grant.id,
            bucket: grant.bucket,
            beneficiary: grant.beneficiary.clone(),
            amount: grant.amount(),
            unlocked,
            locked: grant.amount() - unlocked,
            start: grant.schedule.start,
            vesting_end: grant.schedule.end(),
            as_of,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    pub since: Option<u64>,
    pub as_of: Option<u64>,
}

#[derive(Debug, Serialize)]
struct BucketListResponse {
    as_of: u64,
    total_allocated: u64,
    total_unlocked: u64,
    buckets: Vec<BucketResponse>,
}

async fn list_buckets(
    State(state): State<ApiState>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<BucketListResponse>> {
    let as_of = query.resolve();
    let buckets: Vec<BucketResponse> = state
        .engine
        .buckets()
        .iter()
        .map(|b| BucketResponse::new(b, as_of))
        .collect();

    Ok(Json(BucketListResponse {
        as_of,
        total_allocated: state.engine.total_allocated(),
        total_unlocked: buckets.iter().map(|b| b.unlocked).sum(),
        buckets,
    }))
}

async fn get_bucket(
    State(state): State<ApiState>,
    Path(kind): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<BucketResponse>> {
    let kind: BucketKind = kind.parse()?;
    let bucket = state.engine.bucket(kind)?;
    Ok(Json(BucketResponse::new(&bucket, query.resolve())))
}

async fn get_bucket_event(
    State(state): State<ApiState>,
    Path(kind): Path<String>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Json<UnlockEvent>> {
    let kind: BucketKind = kind.parse()?;
    let as_of = query.as_of.unwrap_or_else(crate::state::now);
    let event = state.engine.bucket_unlock_event(kind, query.since, as_of)?;
    Ok(Json(event))
}

async fn get_grant(
    State(state): State<ApiState>,
    Path(id): Path<GrantId>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<GrantResponse>> {
    let grant = state.engine.grant(id)?;
    Ok(Json(GrantResponse::new(&grant, query.resolve())))
}

async fn get_grant_event(
    State(state): State<ApiState>,
    Path(id): Path<GrantId>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Json<UnlockEvent>> {
    let as_of = query.as_of.unwrap_or_else(crate::state::now);
    let event = state.engine.grant_unlock_event(id, query.since, as_of)?;
    Ok(Json(event))
}

async fn get_beneficiary_grants(
    State(state): State<ApiState>,
    Path(address): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<Vec<GrantResponse>>> {
    let as_of = query.resolve();
    let grants = state
        .engine
        .grants_for(&address)
        .iter()
        .map(|g| GrantResponse::new(g, as_of))
        .collect();
    Ok(Json(grants))
}
