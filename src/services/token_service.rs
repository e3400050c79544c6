use sqlx::PgPool;
use tracing::info;

use crate::error::AppError;
use crate::models::{CreateToken, Token, UpdateTokenPrice};

/// Token registry: lookup, creation and price-field updates. No business
/// logic beyond canonicalization and existence checks.
pub struct TokenService {
    db_pool: PgPool,
}

impl TokenService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// All active tokens, symbol ascending.
    pub async fn list_active(&self) -> Result<Vec<Token>, AppError> {
        let tokens = sqlx::query_as::<_, Token>(
            "SELECT * FROM tokens WHERE is_active = TRUE ORDER BY symbol ASC",
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(tokens)
    }

    pub async fn get_by_symbol(&self, symbol: &str) -> Result<Option<Token>, AppError> {
        let token = sqlx::query_as::<_, Token>("SELECT * FROM tokens WHERE symbol = $1")
            .bind(Token::canonical_symbol(symbol))
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(token)
    }

    pub async fn create(&self, create_token: CreateToken) -> Result<Token, AppError> {
        if create_token.symbol.trim().is_empty() {
            return Err(AppError::ValidationError("symbol is required".to_string()));
        }
        if create_token.name.trim().is_empty() {
            return Err(AppError::ValidationError("name is required".to_string()));
        }
        if create_token.contract_address.trim().is_empty() {
            return Err(AppError::ValidationError(
                "contractAddress is required".to_string(),
            ));
        }

        let token = Token::new(create_token);

        let stored = sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO tokens (
                id, symbol, name, contract_address, decimals, logo_url, is_active,
                current_price, price_change_24h, volume_24h, market_cap,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(token.id)
        .bind(&token.symbol)
        .bind(&token.name)
        .bind(&token.contract_address)
        .bind(token.decimals)
        .bind(&token.logo_url)
        .bind(token.is_active)
        .bind(&token.current_price)
        .bind(&token.price_change_24h)
        .bind(&token.volume_24h)
        .bind(&token.market_cap)
        .bind(token.created_at)
        .bind(token.updated_at)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::DuplicateEntry(_) => AppError::DuplicateEntry(
                "token symbol or contract address already exists".to_string(),
            ),
            other => other,
        })?;

        info!(symbol = %stored.symbol, "Token created");
        Ok(stored)
    }

    /// Set the four mutable market fields. Returns None when the symbol
    /// is unknown.
    pub async fn update_price_fields(
        &self,
        symbol: &str,
        update: UpdateTokenPrice,
    ) -> Result<Option<Token>, AppError> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            UPDATE tokens
            SET current_price = $2,
                price_change_24h = $3,
                volume_24h = $4,
                market_cap = $5,
                updated_at = NOW()
            WHERE symbol = $1
            RETURNING *
            "#,
        )
        .bind(Token::canonical_symbol(symbol))
        .bind(&update.current_price)
        .bind(&update.price_change_24h)
        .bind(&update.volume_24h)
        .bind(&update.market_cap)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(token)
    }

    /// Idempotent seed of the default token set, mirroring the contract
    /// deployment script. Existing rows are left untouched.
    pub async fn seed_defaults(&self) -> Result<(), AppError> {
        let defaults: [(&str, &str, &str, i32, &str); 4] = [
            ("ETH", "Ethereum", "0x0000000000000000000000000000000000000000", 18, "1850.00"),
            ("USDC", "USD Coin", "0xa0b86a33e6441e88c5f2712c3e9b74f5c4d6e3e7", 6, "1.00"),
            ("DAI", "Dai Stablecoin", "0x6b175474e89094c44da98b954eedeac495271d0f", 18, "1.00"),
            ("WBTC", "Wrapped Bitcoin", "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599", 8, "43250.00"),
        ];

        for (symbol, name, address, decimals, price) in defaults {
            let token = Token::new(CreateToken {
                symbol: symbol.to_string(),
                name: name.to_string(),
                contract_address: address.to_string(),
                decimals,
                logo_url: None,
                current_price: price.parse().ok(),
                is_active: true,
            });

            sqlx::query(
                r#"
                INSERT INTO tokens (
                    id, symbol, name, contract_address, decimals, logo_url, is_active,
                    current_price, price_change_24h, volume_24h, market_cap,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                ON CONFLICT (symbol) DO NOTHING
                "#,
            )
            .bind(token.id)
            .bind(&token.symbol)
            .bind(&token.name)
            .bind(&token.contract_address)
            .bind(token.decimals)
            .bind(&token.logo_url)
            .bind(token.is_active)
            .bind(&token.current_price)
            .bind(&token.price_change_24h)
            .bind(&token.volume_24h)
            .bind(&token.market_cap)
            .bind(token.created_at)
            .bind(token.updated_at)
            .execute(&self.db_pool)
            .await?;
        }

        info!("Default tokens seeded");
        Ok(())
    }
}
