pub mod token;
pub mod trade;
pub mod user;

pub use token::{Token, CreateToken, UpdateTokenPrice};
pub use trade::{Trade, CreateTrade, TradeStatus};
pub use user::{User, CreateUser, UpdateUser, GasPriceTier};
