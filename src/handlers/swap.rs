use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::error::AppError;
use crate::handlers::ApiResponse;
use crate::models::Trade;
use crate::services::SwapRequest;
use crate::AppState;

/// Settle a swap: on-chain when a local exchange deployment is
/// configured, otherwise recorded as a demo trade.
/// POST /api/swap
pub async fn execute_swap(
    State(state): State<AppState>,
    Json(request): Json<SwapRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Trade>>), AppError> {
    let trade = state
        .settlement_service
        .settle(request, &state.price_service)
        .await?;

    let message = if state.settlement_service.backend().is_live() {
        "Swap confirmed on-chain"
    } else {
        "Swap recorded in demo mode"
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(trade, message)),
    ))
}

pub fn create_swap_routes() -> Router<AppState> {
    Router::new().route("/", post(execute_swap))
}
