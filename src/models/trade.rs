use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use bigdecimal::BigDecimal;

use crate::models::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Pending,
    Completed,
    Failed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Pending => "pending",
            TradeStatus::Completed => "completed",
            TradeStatus::Failed => "failed",
        }
    }
}

/// An executed (or attempted) swap. The transaction hash is the
/// system-wide idempotency key; a duplicate insert must fail rather than
/// overwrite. Immutable after creation except the pending -> terminal
/// status transition.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub wallet_address: String,
    pub from_token: String,
    pub to_token: String,
    pub from_amount: BigDecimal,
    pub to_amount: BigDecimal,
    pub exchange_rate: BigDecimal,
    pub transaction_hash: String,
    pub status: String,
    pub gas_used: Option<BigDecimal>,
    pub gas_fee: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrade {
    pub wallet_address: String,
    pub from_token: String,
    pub to_token: String,
    pub from_amount: BigDecimal,
    pub to_amount: BigDecimal,
    pub exchange_rate: BigDecimal,
    pub transaction_hash: String,
    pub status: Option<TradeStatus>,
    pub gas_used: Option<BigDecimal>,
    pub gas_fee: Option<BigDecimal>,
}

impl Trade {
    pub fn new(create_trade: CreateTrade) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            wallet_address: Trade::canonical_wallet(&create_trade.wallet_address),
            from_token: Token::canonical_symbol(&create_trade.from_token),
            to_token: Token::canonical_symbol(&create_trade.to_token),
            from_amount: create_trade.from_amount,
            to_amount: create_trade.to_amount,
            exchange_rate: create_trade.exchange_rate,
            transaction_hash: create_trade.transaction_hash,
            status: create_trade
                .status
                .unwrap_or(TradeStatus::Pending)
                .as_str()
                .to_string(),
            gas_used: create_trade.gas_used,
            gas_fee: create_trade.gas_fee,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical form used for every wallet lookup and write.
    pub fn canonical_wallet(wallet_address: &str) -> String {
        wallet_address.trim().to_lowercase()
    }
}
