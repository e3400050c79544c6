use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{ApiResponse, PaginatedResponse, Pagination, PaginationQuery};
use crate::models::{CreateTrade, Trade};
use crate::services::TradeService;
use crate::AppState;

/// All trades, newest first, paginated.
/// GET /api/trades
pub async fn list_trades(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Trade>>, AppError> {
    let (page, limit) = (query.page(), query.limit());
    let trade_service = TradeService::new(state.db_pool.clone());
    let (trades, total) = trade_service.list_trades(page, limit).await?;

    Ok(Json(PaginatedResponse::ok(
        trades,
        Pagination::new(page, limit, total),
    )))
}

/// GET /api/trades/:id
pub async fn get_trade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Trade>>, AppError> {
    let trade_service = TradeService::new(state.db_pool.clone());
    let trade = trade_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trade not found".to_string()))?;

    Ok(Json(ApiResponse::ok(trade)))
}

/// Record a trade; upserts the owning user as a side effect.
/// POST /api/trades
pub async fn create_trade(
    State(state): State<AppState>,
    Json(request): Json<CreateTrade>,
) -> Result<(StatusCode, Json<ApiResponse<Trade>>), AppError> {
    let trade_service = TradeService::with_strict_tokens(
        state.db_pool.clone(),
        state.settings.validation.require_registered_tokens,
    );
    let trade = trade_service.record_trade(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(trade))))
}

/// Trades for one wallet, newest first, paginated. The wallet is
/// lowercased before lookup.
/// GET /api/trades/user/:walletAddress
pub async fn get_user_trades(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<Trade>>, AppError> {
    let (page, limit) = (query.page(), query.limit());
    let trade_service = TradeService::new(state.db_pool.clone());
    let (trades, total) = trade_service
        .list_for_wallet(&wallet_address, page, limit)
        .await?;

    Ok(Json(PaginatedResponse::ok(
        trades,
        Pagination::new(page, limit, total),
    )))
}

pub fn create_trade_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trades))
        .route("/", post(create_trade))
        .route("/user/:wallet_address", get(get_user_trades))
        .route("/:id", get(get_trade))
}
