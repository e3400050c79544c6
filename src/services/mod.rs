pub mod token_service;
pub mod trade_service;
pub mod user_service;
pub mod price_service;
pub mod settlement_service;
pub mod exchange_bindings;

// Re-export the services
pub use token_service::TokenService;
pub use trade_service::TradeService;
pub use user_service::{UserService, UserStats};
pub use price_service::{PriceService, TokenPrice};
pub use settlement_service::{SettlementBackend, SettlementService, SwapRequest};
