//! Integration tests for the vesting API
//!
//! Drives the full router in-process:
//! - Bucket and grant queries
//! - Fee quotes and the daily sell limit
//! - Admin token enforcement
//! - Burns

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use bloomex_api::{app, ApiState};
use bloomex_economics::constants::{MONTH, QUARTER};
use bloomex_economics::GenesisConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TGE: u64 = 1_767_225_600;
const TOKEN: &str = "test-admin-token";

fn test_app() -> Router {
    let engine = GenesisConfig::bloomex(TGE).build().expect("genesis");
    app(ApiState::new(Arc::new(engine), Some(TOKEN.to_string())))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn post(app: &Router, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_seed_bucket_halfway() {
    let app = test_app();
    let as_of = TGE + 12 * MONTH;

    let (status, body) = get(&app, &format!("/vesting/buckets/seed?as_of={}", as_of)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unlocked"], 210_000_000u64);
    assert_eq!(body["locked"], 190_000_000u64);
    assert_eq!(body["kind"], "seed");
}

#[tokio::test]
async fn test_bucket_list_totals() {
    let app = test_app();
    let (status, body) = get(&app, &format!("/vesting/buckets?as_of={}", TGE - 1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_allocated"], 10_000_000_000u64);
    assert_eq!(body["total_unlocked"], 0);
    assert_eq!(body["buckets"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_unknown_bucket_is_404() {
    let app = test_app();
    let (status, body) = get(&app, "/vesting/buckets/treasury").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_bucket_event() {
    let app = test_app();
    let uri = format!(
        "/vesting/buckets/seed/event?since={}&as_of={}",
        TGE,
        TGE + 12 * MONTH
    );
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newly_unlocked"], 190_000_000u64);
    assert_eq!(body["cumulative_unlocked"], 210_000_000u64);
}

#[tokio::test]
async fn test_admin_requires_token() {
    let app = test_app();
    let grant = json!({
        "bucket": "private1",
        "beneficiary": "fund-a",
        "amount": 1_000_000
    });

    let (status, _) = post(&app, "/admin/grants", grant.clone(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/admin/grants", grant.clone(), Some("nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(&app, "/admin/grants", grant, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, body) = get(&app, &format!("/vesting/grants/1?as_of={}", TGE)).await;
    assert_eq!(status, StatusCode::OK);
    // Private round 1: 10% at TGE
    assert_eq!(body["unlocked"], 100_000);

    let (_, grants) = get(&app, "/vesting/beneficiary/fund-a").await;
    assert_eq!(grants.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_duplicate_bucket_rejected() {
    let app = test_app();
    let bucket = json!({
        "kind": "team",
        "total_amount": 1,
        "cliff_duration": 0,
        "vesting_duration": 0,
        "initial_unlock_pct": 0
    });

    let (status, body) = post(&app, "/admin/buckets", bucket, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid allocation"));
}

#[tokio::test]
async fn test_fee_quote_and_daily_limit() {
    let app = test_app();

    let (status, quote) = get(&app, "/fees/quote?amount=1000000&since_unlock_secs=108000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["fee_rate_bps"], 200);
    assert_eq!(quote["fee"], 20_000);

    let as_of = TGE + 60;
    let (_, window) = get(&app, &format!("/fees/window?as_of={}", as_of)).await;
    let limit = window["limit"].as_u64().unwrap();

    let sell = json!({ "amount": limit, "since_unlock_secs": 0, "as_of": as_of });
    let (status, _) = post(&app, "/admin/sell", sell, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);

    let sell = json!({ "amount": 1, "since_unlock_secs": 0, "as_of": as_of });
    let (status, body) = post(&app, "/admin/sell", sell, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "exceeds_daily_limit");
}

#[tokio::test]
async fn test_fee_intake_and_burn() {
    let app = test_app();

    let (status, _) = post(&app, "/admin/fees", json!({ "amount": 5_000_000 }), Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);

    let early = json!({ "as_of": TGE + 10 });
    let (status, _) = post(&app, "/admin/burn", early, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let due = json!({ "as_of": TGE + QUARTER });
    let (status, body) = post(&app, "/admin/burn", due, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "burned");
    assert_eq!(body["amount"], 50_000);

    let (_, supply) = get(&app, &format!("/supply?as_of={}", TGE + QUARTER)).await;
    assert_eq!(supply["total_burned"], 50_000);
    assert_eq!(supply["total_supply"], 10_000_000_000u64 - 50_000);
}

#[tokio::test]
async fn test_staking_flow() {
    let app = test_app();

    let (status, apy) = get(&app, "/staking/apy?amount=100000&lock_days=180").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(apy["tier"], "bloom");
    assert_eq!(apy["total_bps"], 1_450);

    let (status, _) = get(&app, "/staking/apy?amount=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let stake = json!({ "owner": "grower", "amount": 100_000, "lock_days": 90, "as_of": TGE });
    let (status, _) = post(&app, "/staking/stake", stake, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, position) = get(&app, &format!("/staking/positions/grower?as_of={}", TGE + 73 * 86_400)).await;
    assert_eq!(status, StatusCode::OK);
    // 100,000 at 13% for 73 days
    assert_eq!(position["accrued_rewards"], 2_600);

    let early = json!({ "owner": "grower", "as_of": TGE + 86_400 });
    let (status, _) = post(&app, "/staking/unstake", early, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let claim = json!({ "owner": "grower", "as_of": TGE + 73 * 86_400 });
    let (status, _) = post(&app, "/staking/claim", claim.clone(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, claimed) = post(&app, "/staking/claim", claim, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(claimed["rewards"], 2_600);

    let (_, position) = get(&app, &format!("/staking/positions/grower?as_of={}", TGE + 73 * 86_400)).await;
    assert_eq!(position["accrued_rewards"], 0);
    assert_eq!(position["total_claimed"], 2_600);
}

#[tokio::test]
async fn test_huge_lock_days_saturates_to_top_bonus() {
    let app = test_app();
    let lock_days = u64::MAX / 86_400 + 1;

    let (status, apy) = get(&app, &format!("/staking/apy?amount=10000&lock_days={}", lock_days)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(apy["bonus_bps"], 500);
    assert_eq!(apy["total_bps"], 1_300);

    let stake = json!({ "owner": "patient", "amount": 10_000, "lock_days": u64::MAX, "as_of": TGE });
    let (status, position) = post(&app, "/staking/stake", stake, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(position["lock_period"], u64::MAX);
}

#[tokio::test]
async fn test_stake_above_supply_is_bad_request() {
    let app = test_app();
    let stake = json!({ "owner": "whale", "amount": u64::MAX, "lock_days": 0, "as_of": TGE });
    let (status, body) = post(&app, "/staking/stake", stake, Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("maximum"));
}
