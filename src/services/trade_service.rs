use sqlx::PgPool;
use uuid::Uuid;
use tracing::info;

use crate::error::AppError;
use crate::models::{CreateTrade, Trade};

/// Append-only trade ledger plus the per-wallet user aggregate that every
/// recorded trade upserts.
pub struct TradeService {
    db_pool: PgPool,
    require_registered_tokens: bool,
}

impl TradeService {
    pub fn new(db_pool: PgPool) -> Self {
        Self {
            db_pool,
            require_registered_tokens: false,
        }
    }

    pub fn with_strict_tokens(db_pool: PgPool, require_registered_tokens: bool) -> Self {
        Self {
            db_pool,
            require_registered_tokens,
        }
    }

    /// Record a trade and bump the owning user's trade count. Both writes
    /// run in one database transaction; the increment is performed by the
    /// store itself so concurrent trades for the same wallet cannot lose
    /// updates.
    pub async fn record_trade(&self, create_trade: CreateTrade) -> Result<Trade, AppError> {
        self.validate(&create_trade)?;

        if self.require_registered_tokens {
            self.check_registered(&create_trade).await?;
        }

        let trade = Trade::new(create_trade);
        let mut tx = self.db_pool.begin().await?;

        let stored = sqlx::query_as::<_, Trade>(
            r#"
            INSERT INTO trades (
                id, wallet_address, from_token, to_token, from_amount, to_amount,
                exchange_rate, transaction_hash, status, gas_used, gas_fee,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(trade.id)
        .bind(&trade.wallet_address)
        .bind(&trade.from_token)
        .bind(&trade.to_token)
        .bind(&trade.from_amount)
        .bind(&trade.to_amount)
        .bind(&trade.exchange_rate)
        .bind(&trade.transaction_hash)
        .bind(&trade.status)
        .bind(&trade.gas_used)
        .bind(&trade.gas_fee)
        .bind(trade.created_at)
        .bind(trade.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::DuplicateEntry(_) => {
                AppError::DuplicateEntry("duplicate trade".to_string())
            }
            other => other,
        })?;

        // Upsert the user aggregate. The increment happens inside the
        // store, never as an application-side read-modify-write.
        sqlx::query(
            r#"
            INSERT INTO users (
                id, wallet_address, total_trades, total_volume,
                slippage_tolerance, gas_price, is_active, created_at, updated_at
            ) VALUES ($1, $2, 1, $3, 0.5, 'medium', TRUE, NOW(), NOW())
            ON CONFLICT (wallet_address) DO UPDATE
            SET total_trades = users.total_trades + 1,
                total_volume = users.total_volume + EXCLUDED.total_volume,
                updated_at = NOW()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&stored.wallet_address)
        .bind(&stored.from_amount)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            wallet = %stored.wallet_address,
            tx_hash = %stored.transaction_hash,
            "Trade recorded"
        );
        Ok(stored)
    }

    /// All trades, newest first.
    pub async fn list_trades(&self, page: i64, limit: i64) -> Result<(Vec<Trade>, i64), AppError> {
        let offset = (page - 1) * limit;

        let trades = sqlx::query_as::<_, Trade>(
            "SELECT * FROM trades ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trades")
            .fetch_one(&self.db_pool)
            .await?;

        Ok((trades, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Trade>, AppError> {
        let trade = sqlx::query_as::<_, Trade>("SELECT * FROM trades WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(trade)
    }

    /// Trades for one wallet, newest first.
    pub async fn list_for_wallet(
        &self,
        wallet_address: &str,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Trade>, i64), AppError> {
        let wallet = Trade::canonical_wallet(wallet_address);
        let offset = (page - 1) * limit;

        let trades = sqlx::query_as::<_, Trade>(
            r#"
            SELECT * FROM trades
            WHERE wallet_address = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&wallet)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM trades WHERE wallet_address = $1")
                .bind(&wallet)
                .fetch_one(&self.db_pool)
                .await?;

        Ok((trades, total))
    }

    /// Completed trades for one wallet, newest first, no paging. Used by
    /// the user stats endpoint.
    pub async fn completed_for_wallet(&self, wallet_address: &str) -> Result<Vec<Trade>, AppError> {
        let trades = sqlx::query_as::<_, Trade>(
            r#"
            SELECT * FROM trades
            WHERE wallet_address = $1 AND status = 'completed'
            ORDER BY created_at DESC
            "#,
        )
        .bind(Trade::canonical_wallet(wallet_address))
        .fetch_all(&self.db_pool)
        .await?;

        Ok(trades)
    }

    fn validate(&self, create_trade: &CreateTrade) -> Result<(), AppError> {
        if create_trade.wallet_address.trim().is_empty() {
            return Err(AppError::ValidationError("walletAddress is required".to_string()));
        }
        if create_trade.from_token.trim().is_empty() || create_trade.to_token.trim().is_empty() {
            return Err(AppError::ValidationError(
                "fromToken and toToken are required".to_string(),
            ));
        }
        if create_trade.transaction_hash.trim().is_empty() {
            return Err(AppError::ValidationError(
                "transactionHash is required".to_string(),
            ));
        }
        Ok(())
    }

    async fn check_registered(&self, create_trade: &CreateTrade) -> Result<(), AppError> {
        let token_service = super::TokenService::new(self.db_pool.clone());
        for symbol in [&create_trade.from_token, &create_trade.to_token] {
            if token_service.get_by_symbol(symbol).await?.is_none() {
                return Err(AppError::ValidationError(format!(
                    "unknown token: {}",
                    symbol
                )));
            }
        }
        Ok(())
    }
}
