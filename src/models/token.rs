use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use bigdecimal::BigDecimal;

/// A listed token. The symbol is always stored uppercase and the contract
/// address lowercase; both are unique across the registry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    pub decimals: i32,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub current_price: BigDecimal,
    pub price_change_24h: BigDecimal,
    pub volume_24h: BigDecimal,
    pub market_cap: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToken {
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    #[serde(default = "default_decimals")]
    pub decimals: i32,
    pub logo_url: Option<String>,
    pub current_price: Option<BigDecimal>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_decimals() -> i32 {
    18
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenPrice {
    pub current_price: BigDecimal,
    pub price_change_24h: BigDecimal,
    pub volume_24h: BigDecimal,
    pub market_cap: BigDecimal,
}

impl Token {
    pub fn new(create_token: CreateToken) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            symbol: Token::canonical_symbol(&create_token.symbol),
            name: create_token.name,
            contract_address: Token::canonical_address(&create_token.contract_address),
            decimals: create_token.decimals,
            logo_url: create_token.logo_url,
            is_active: create_token.is_active,
            current_price: create_token.current_price.unwrap_or_else(|| BigDecimal::from(0)),
            price_change_24h: BigDecimal::from(0),
            volume_24h: BigDecimal::from(0),
            market_cap: BigDecimal::from(0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical form used for every symbol lookup and write.
    pub fn canonical_symbol(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    /// Canonical form used for every contract address lookup and write.
    pub fn canonical_address(address: &str) -> String {
        address.trim().to_lowercase()
    }
}
