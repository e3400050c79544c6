use bigdecimal::BigDecimal;
use std::str::FromStr;

use fluxtrade::models::{
    CreateToken, CreateTrade, CreateUser, Token, Trade, TradeStatus, User,
};

fn sample_token() -> CreateToken {
    CreateToken {
        symbol: "  weth ".to_string(),
        name: "Wrapped Ether".to_string(),
        contract_address: "0xC02AAA39B223FE8D0A0E5C4F27EAD9083C756CC2".to_string(),
        decimals: 18,
        logo_url: None,
        current_price: None,
        is_active: true,
    }
}

#[test]
fn test_token_canonicalizes_symbol_and_address() {
    let token = Token::new(sample_token());

    assert_eq!(token.symbol, "WETH");
    assert_eq!(
        token.contract_address,
        "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
    );
    assert!(token.is_active);
    assert_eq!(token.decimals, 18);
    assert_eq!(token.current_price, BigDecimal::from(0));
}

#[test]
fn test_trade_lowercases_wallet_and_defaults_pending() {
    let create = CreateTrade {
        wallet_address: "0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266".to_string(),
        from_token: "eth".to_string(),
        to_token: "usdc".to_string(),
        from_amount: BigDecimal::from_str("1.5").unwrap(),
        to_amount: BigDecimal::from_str("2775").unwrap(),
        exchange_rate: BigDecimal::from(1850),
        transaction_hash: "0xdeadbeef".to_string(),
        status: None,
        gas_used: None,
        gas_fee: None,
    };

    let trade = Trade::new(create);

    assert_eq!(
        trade.wallet_address,
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );
    assert_eq!(trade.from_token, "ETH");
    assert_eq!(trade.to_token, "USDC");
    assert_eq!(trade.status, TradeStatus::Pending.as_str());
}

#[test]
fn test_trade_keeps_explicit_status() {
    let create = CreateTrade {
        wallet_address: "0xabc".to_string(),
        from_token: "ETH".to_string(),
        to_token: "DAI".to_string(),
        from_amount: BigDecimal::from(1),
        to_amount: BigDecimal::from(1850),
        exchange_rate: BigDecimal::from(1850),
        transaction_hash: "0xbeef".to_string(),
        status: Some(TradeStatus::Completed),
        gas_used: None,
        gas_fee: None,
    };

    let trade = Trade::new(create);
    assert_eq!(trade.status, "completed");
}

#[test]
fn test_user_defaults() {
    let create = CreateUser {
        wallet_address: "0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266".to_string(),
        email: Some("Trader@Example.COM".to_string()),
        username: Some("trader".to_string()),
    };

    let user = User::new(create);

    assert_eq!(
        user.wallet_address,
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );
    assert_eq!(user.email.as_deref(), Some("trader@example.com"));
    assert_eq!(user.total_trades, 0);
    assert_eq!(user.total_volume, BigDecimal::from(0));
    assert_eq!(user.slippage_tolerance, 0.5);
    assert_eq!(user.gas_price, "medium");
    assert!(user.is_active);
}

#[test]
fn test_trade_serializes_camel_case() {
    let create = CreateTrade {
        wallet_address: "0xabc".to_string(),
        from_token: "ETH".to_string(),
        to_token: "USDC".to_string(),
        from_amount: BigDecimal::from(1),
        to_amount: BigDecimal::from(1850),
        exchange_rate: BigDecimal::from(1850),
        transaction_hash: "0xbeef".to_string(),
        status: None,
        gas_used: None,
        gas_fee: None,
    };

    let json = serde_json::to_value(Trade::new(create)).unwrap();
    assert!(json.get("walletAddress").is_some());
    assert!(json.get("fromAmount").is_some());
    assert!(json.get("transactionHash").is_some());
    assert!(json.get("wallet_address").is_none());
}
