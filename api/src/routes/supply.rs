//! Supply ledger and fee endpoints

use super::AsOfQuery;
use crate::{ApiResult, ApiState};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use bloomex_economics::{FeeQuote, SellWindowStatus, SupplyStats};
use serde::{Deserialize, Serialize};

pub fn supply_routes() -> Router<ApiState> {
    Router::new().route("/", get(get_supply))
}

pub fn fee_routes() -> Router<ApiState> {
    Router::new()
        .route("/quote", get(get_fee_quote))
        .route("/window", get(get_sell_window))
}

#[derive(Debug, Serialize)]
struct SupplyResponse {
    as_of: u64,
    #[serde(flatten)]
    stats: SupplyStats,
    total_unlocked: u64,
    circulating_supply: u64,
}

async fn get_supply(
    State(state): State<ApiState>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<SupplyResponse>> {
    let as_of = query.resolve();

    Ok(Json(SupplyResponse {
        as_of,
        stats: state.engine.supply_stats(),
        total_unlocked: state.engine.total_unlocked(as_of),
        circulating_supply: state.engine.circulating_supply(as_of),
    }))
}

#[derive(Debug, Deserialize)]
pub struct FeeQuoteQuery {
    pub amount: u64,
    #[serde(default)]
    pub since_unlock_secs: u64,
}

async fn get_fee_quote(
    State(state): State<ApiState>,
    Query(query): Query<FeeQuoteQuery>,
) -> ApiResult<Json<FeeQuote>> {
    Ok(Json(
        state.engine.quote_fee(query.amount, query.since_unlock_secs),
    ))
}

async fn get_sell_window(
    State(state): State<ApiState>,
    Query(query): Query<AsOfQuery>,
) -> ApiResult<Json<SellWindowStatus>> {
    Ok(Json(state.engine.sell_window(query.resolve())))
}
