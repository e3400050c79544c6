use fluxtrade::{
    config::{DeploymentInfo, Settings},
    database::{establish_connection, run_migrations, test_connection},
    handlers,
    services::{PriceService, SettlementBackend, SettlementService, TokenService},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting FluxTrade API");

    let settings = Settings::new()?;
    info!("Configuration loaded successfully");

    let db_pool = establish_connection(&settings.database.url).await?;
    test_connection(&db_pool).await?;
    run_migrations(&db_pool).await?;

    if settings.database.seed_tokens {
        TokenService::new(db_pool.clone()).seed_defaults().await?;
    }

    let price_service = Arc::new(PriceService::new(
        settings.prices.coingecko_base_url.clone(),
        Duration::from_secs(settings.prices.cache_ttl_seconds),
    ));

    let deployment = DeploymentInfo::load(&settings.blockchain.deployments_path)?;
    let backend = SettlementBackend::select(&settings, deployment)?;
    let settlement_service = Arc::new(SettlementService::new(
        backend,
        db_pool.clone(),
        settings.validation.require_registered_tokens,
    ));

    let state = AppState {
        db_pool,
        settings: settings.clone(),
        price_service,
        settlement_service,
    };

    let server_handle = {
        let state = state.clone();
        let settings = settings.clone();
        tokio::spawn(async move {
            if let Err(e) = start_web_server(state, settings).await {
                error!("Web server error: {}", e);
            }
        })
    };

    info!(
        "FluxTrade API running on {}:{}",
        settings.api.host, settings.api.port
    );

    tokio::select! {
        _ = server_handle => {
            error!("Web server stopped unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down FluxTrade API");
    Ok(())
}

async fn start_web_server(
    state: AppState,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use axum::{http::StatusCode, response::Json, routing::get, Router};
    use serde_json::json;
    use std::net::SocketAddr;
    use tower_http::{cors::CorsLayer, trace::TraceLayer};

    let app = Router::new()
        .route("/api/health", get(handlers::health_check))
        .nest("/api/tokens", handlers::create_token_routes())
        .nest("/api/trades", handlers::create_trade_routes())
        .nest("/api/users", handlers::create_user_routes())
        .nest("/api/prices", handlers::create_price_routes())
        .nest("/api/swap", handlers::create_swap_routes())
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "message": "Route not found",
                })),
            )
        })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API endpoints available at:");
    info!("  GET    /api/tokens - List active tokens");
    info!("  GET    /api/tokens/{{symbol}} - Get token");
    info!("  POST   /api/tokens - Create token");
    info!("  PUT    /api/tokens/{{symbol}}/price - Update market fields");
    info!("  GET    /api/trades - List trades");
    info!("  GET    /api/trades/{{id}} - Get trade");
    info!("  POST   /api/trades - Record trade");
    info!("  GET    /api/trades/user/{{wallet}} - List trades for wallet");
    info!("  GET    /api/users/{{wallet}} - Get user");
    info!("  POST   /api/users - Create user");
    info!("  PUT    /api/users/{{wallet}} - Update preferences");
    info!("  GET    /api/users/{{wallet}}/stats - User stats");
    info!("  GET    /api/prices - Price cache snapshot");
    info!("  POST   /api/swap - Settle a swap");
    info!("  GET    /api/health - Liveness probe");

    axum::serve(listener, app).await?;
    Ok(())
}
