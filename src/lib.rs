pub mod config;
pub mod models;
pub mod services;
pub mod handlers;
pub mod database;
pub mod utils;
pub mod error;

pub use error::types::*;

use sqlx::PgPool;
use std::sync::Arc;

use config::Settings;
use services::{PriceService, SettlementService};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Settings,
    pub price_service: Arc<PriceService>,
    pub settlement_service: Arc<SettlementService>,
}
