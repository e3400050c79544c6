//! Ledger invariants that need a real database. Gated on
//! TEST_DATABASE_URL; without it each test returns early.

use bigdecimal::BigDecimal;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use fluxtrade::database::{establish_connection, run_migrations};
use fluxtrade::error::AppError;
use fluxtrade::models::{CreateTrade, TradeStatus};
use fluxtrade::services::{TradeService, UserService};

async fn test_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = establish_connection(&url).await.expect("test database");
    run_migrations(&pool).await.expect("migrations");
    Some(pool)
}

fn fresh_wallet() -> String {
    format!("0x{}", Uuid::new_v4().simple())
}

fn trade_for(wallet: &str, amount: &str) -> CreateTrade {
    CreateTrade {
        wallet_address: wallet.to_string(),
        from_token: "ETH".to_string(),
        to_token: "USDC".to_string(),
        from_amount: BigDecimal::from_str(amount).unwrap(),
        to_amount: BigDecimal::from_str(amount).unwrap() * BigDecimal::from(1850),
        exchange_rate: BigDecimal::from(1850),
        transaction_hash: format!("0x{}", Uuid::new_v4().simple()),
        status: Some(TradeStatus::Completed),
        gas_used: None,
        gas_fee: None,
    }
}

#[tokio::test]
async fn test_duplicate_transaction_hash_leaves_one_record() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let wallet = fresh_wallet();
    let trade_service = TradeService::new(pool.clone());

    let trade = trade_for(&wallet, "1");
    let duplicate = trade.clone();

    trade_service
        .record_trade(trade)
        .await
        .expect("first insert");

    let second = trade_service.record_trade(duplicate).await;
    match second {
        Err(AppError::DuplicateEntry(msg)) => assert_eq!(msg, "duplicate trade"),
        _ => panic!("expected a duplicate entry error"),
    }

    let (trades, total) = trade_service.list_for_wallet(&wallet, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(trades.len(), 1);
}

#[tokio::test]
async fn test_recorded_trades_match_user_aggregate() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let wallet = fresh_wallet();
    let trade_service = TradeService::new(pool.clone());

    for amount in ["1", "2", "0.5"] {
        trade_service
            .record_trade(trade_for(&wallet, amount))
            .await
            .expect("recorded trade");
    }

    let user = UserService::new(pool.clone())
        .get_by_wallet(&wallet)
        .await
        .unwrap()
        .expect("user upserted by the trade write path");

    assert_eq!(user.total_trades, 3);
    assert_eq!(user.total_volume, BigDecimal::from_str("3.5").unwrap());
}

#[tokio::test]
async fn test_duplicate_trade_does_not_bump_user_aggregate() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let wallet = fresh_wallet();
    let trade_service = TradeService::new(pool.clone());

    let trade = trade_for(&wallet, "1");
    let duplicate = trade.clone();
    trade_service.record_trade(trade).await.expect("first insert");
    // The rejected insert aborts the whole transaction, user bump included.
    assert!(trade_service.record_trade(duplicate).await.is_err());

    let user = UserService::new(pool)
        .get_by_wallet(&wallet)
        .await
        .unwrap()
        .expect("user upserted by the trade write path");
    assert_eq!(user.total_trades, 1);
}
