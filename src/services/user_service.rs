use sqlx::PgPool;
use serde::Serialize;
use bigdecimal::BigDecimal;
use tracing::info;

use crate::error::AppError;
use crate::models::{CreateUser, Trade, UpdateUser, User};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_trades: i64,
    pub total_volume: BigDecimal,
    pub success_rate: String,
    pub recent_trades: Vec<Trade>,
}

pub struct UserService {
    db_pool: PgPool,
}

impl UserService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn get_by_wallet(&self, wallet_address: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE wallet_address = $1")
            .bind(Trade::canonical_wallet(wallet_address))
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    pub async fn create(&self, create_user: CreateUser) -> Result<User, AppError> {
        if create_user.wallet_address.trim().is_empty() {
            return Err(AppError::ValidationError(
                "walletAddress is required".to_string(),
            ));
        }

        let user = User::new(create_user);

        let stored = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, wallet_address, email, username, total_trades, total_volume,
                slippage_tolerance, gas_price, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.wallet_address)
        .bind(&user.email)
        .bind(&user.username)
        .bind(user.total_trades)
        .bind(&user.total_volume)
        .bind(user.slippage_tolerance)
        .bind(&user.gas_price)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::DuplicateEntry(_) => {
                AppError::DuplicateEntry("User already exists".to_string())
            }
            other => other,
        })?;

        info!(wallet = %stored.wallet_address, "User created");
        Ok(stored)
    }

    /// Update profile fields and preferences. Absent fields are left
    /// unchanged. Returns None when the wallet is unknown.
    pub async fn update(
        &self,
        wallet_address: &str,
        update: UpdateUser,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                username = COALESCE($3, username),
                slippage_tolerance = COALESCE($4, slippage_tolerance),
                gas_price = COALESCE($5, gas_price),
                updated_at = NOW()
            WHERE wallet_address = $1
            RETURNING *
            "#,
        )
        .bind(Trade::canonical_wallet(wallet_address))
        .bind(update.email.map(|e| e.trim().to_lowercase()))
        .bind(update.username)
        .bind(update.slippage_tolerance)
        .bind(update.gas_price.map(|g| g.as_str().to_string()))
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    /// Aggregate stats recomputed from completed trades, plus the five
    /// most recent of them.
    pub async fn stats(&self, wallet_address: &str) -> Result<Option<UserStats>, AppError> {
        let Some(user) = self.get_by_wallet(wallet_address).await? else {
            return Ok(None);
        };

        let trade_service = super::TradeService::new(self.db_pool.clone());
        let completed = trade_service.completed_for_wallet(wallet_address).await?;

        let success_rate = if completed.is_empty() { "0%" } else { "100%" };

        Ok(Some(UserStats {
            total_trades: completed.len() as i64,
            total_volume: user.total_volume,
            success_rate: success_rate.to_string(),
            recent_trades: completed.into_iter().take(5).collect(),
        }))
    }
}
