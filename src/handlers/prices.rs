use axum::{extract::State, response::Json, routing::get, Router};
use std::collections::HashMap;

use crate::error::AppError;
use crate::handlers::ApiResponse;
use crate::services::TokenPrice;
use crate::AppState;

/// Current price-cache snapshot for the tracked symbol set. Never fails:
/// a stale cache or upstream outage degrades to last-known-good data.
/// GET /api/prices
pub async fn get_prices(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HashMap<String, TokenPrice>>>, AppError> {
    let prices = state.price_service.get_prices().await;
    Ok(Json(ApiResponse::ok(prices)))
}

pub fn create_price_routes() -> Router<AppState> {
    Router::new().route("/", get(get_prices))
}
