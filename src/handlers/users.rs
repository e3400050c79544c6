use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};

use crate::error::AppError;
use crate::handlers::ApiResponse;
use crate::models::{CreateUser, UpdateUser, User};
use crate::services::{UserService, UserStats};
use crate::AppState;

/// Fetch a user; the wallet is lowercased before lookup.
/// GET /api/users/:walletAddress
pub async fn get_user(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user_service = UserService::new(state.db_pool.clone());
    let user = user_service
        .get_by_wallet(&wallet_address)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(user)))
}

/// Explicit signup. Rejects a wallet that already exists.
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let user_service = UserService::new(state.db_pool.clone());
    let user = user_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// Update profile fields and preferences.
/// PUT /api/users/:walletAddress
pub async fn update_user(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
    Json(request): Json<UpdateUser>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user_service = UserService::new(state.db_pool.clone());
    let user = user_service
        .update(&wallet_address, request)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(user)))
}

/// Aggregate stats recomputed from completed trades.
/// GET /api/users/:walletAddress/stats
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<ApiResponse<UserStats>>, AppError> {
    let user_service = UserService::new(state.db_pool.clone());
    let stats = user_service
        .stats(&wallet_address)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(stats)))
}

pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:wallet_address", get(get_user))
        .route("/:wallet_address", put(update_user))
        .route("/:wallet_address/stats", get(get_user_stats))
}
