use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use bigdecimal::BigDecimal;

use crate::models::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasPriceTier {
    Low,
    Medium,
    High,
}

impl GasPriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            GasPriceTier::Low => "low",
            GasPriceTier::Medium => "medium",
            GasPriceTier::High => "high",
        }
    }
}

/// Per-wallet aggregate record. Created lazily by the first recorded
/// trade (upsert) or explicitly via signup; the wallet address is unique
/// and always stored lowercase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub wallet_address: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub total_trades: i64,
    pub total_volume: BigDecimal,
    pub slippage_tolerance: f64,
    pub gas_price: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub wallet_address: String,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub slippage_tolerance: Option<f64>,
    pub gas_price: Option<GasPriceTier>,
}

impl User {
    pub fn new(create_user: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            wallet_address: Trade::canonical_wallet(&create_user.wallet_address),
            email: create_user.email.map(|e| e.trim().to_lowercase()),
            username: create_user.username,
            total_trades: 0,
            total_volume: BigDecimal::from(0),
            slippage_tolerance: 0.5,
            gas_price: GasPriceTier::Medium.as_str().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
