use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};

use crate::error::AppError;
use crate::handlers::ApiResponse;
use crate::models::{CreateToken, Token, UpdateTokenPrice};
use crate::services::TokenService;
use crate::AppState;

/// List all active tokens, symbol ascending.
/// GET /api/tokens
pub async fn list_tokens(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Token>>>, AppError> {
    let token_service = TokenService::new(state.db_pool.clone());
    let tokens = token_service.list_active().await?;

    Ok(Json(ApiResponse::ok(tokens)))
}

/// Fetch one token; the symbol is uppercased before lookup.
/// GET /api/tokens/:symbol
pub async fn get_token(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Token>>, AppError> {
    let token_service = TokenService::new(state.db_pool.clone());
    let token = token_service
        .get_by_symbol(&symbol)
        .await?
        .ok_or_else(|| AppError::NotFound("Token not found".to_string()))?;

    Ok(Json(ApiResponse::ok(token)))
}

/// Register a new token.
/// POST /api/tokens
pub async fn create_token(
    State(state): State<AppState>,
    Json(request): Json<CreateToken>,
) -> Result<(StatusCode, Json<ApiResponse<Token>>), AppError> {
    let token_service = TokenService::new(state.db_pool.clone());
    let token = token_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(token))))
}

/// Update the mutable market fields.
/// PUT /api/tokens/:symbol/price
pub async fn update_token_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<UpdateTokenPrice>,
) -> Result<Json<ApiResponse<Token>>, AppError> {
    let token_service = TokenService::new(state.db_pool.clone());
    let token = token_service
        .update_price_fields(&symbol, request)
        .await?
        .ok_or_else(|| AppError::NotFound("Token not found".to_string()))?;

    Ok(Json(ApiResponse::ok(token)))
}

pub fn create_token_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tokens))
        .route("/", post(create_token))
        .route("/:symbol", get(get_token))
        .route("/:symbol/price", put(update_token_price))
}
