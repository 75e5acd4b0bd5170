//! API routes organization
//!
//! - `vesting` - Bucket and grant unlock queries
//! - `supply` - Supply ledger, fee quotes and the daily sell window
//! - `staking` - APY lookups and staking positions
//! - `admin` - Privileged registration, sells, fees and burns

mod admin;
mod staking;
mod supply;
mod vesting;

use crate::ApiState;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Create the main router with all API endpoints
pub fn create_routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/vesting", vesting::vesting_routes())
        .nest("/supply", supply::supply_routes())
        .nest("/fees", supply::fee_routes())
        .nest("/staking", staking::staking_routes())
        .nest("/admin", admin::admin_routes())
}

/// Optional point-in-time for read endpoints; defaults to now
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<u64>,
}

impl AsOfQuery {
    pub fn resolve(&self) -> u64 {
        self.as_of.unwrap_or_else(crate::state::now)
    }
}

async fn root() -> &'static str {
    "Bloomex Vesting API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    uptime_secs: u64,
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<ApiState>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
