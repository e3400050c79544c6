use alloy::primitives::U256;
use bigdecimal::{num_bigint::BigInt, BigDecimal};
use std::str::FromStr;

use crate::error::AppError;

/// Convert a human-readable token amount into base units (wei-style
/// integer) for the given decimal precision. Fractional dust beyond the
/// token's precision is truncated.
pub fn to_base_units(amount: &BigDecimal, decimals: i32) -> Result<U256, AppError> {
    if amount < &BigDecimal::from(0) {
        return Err(AppError::ValidationError(
            "amount must not be negative".to_string(),
        ));
    }

    // BigDecimal::new(d, s) is d * 10^(-s), so a negative scale scales up.
    let factor = BigDecimal::new(BigInt::from(1), -(decimals as i64));
    let scaled = (amount * factor).with_scale(0);

    U256::from_str(&scaled.to_string())
        .map_err(|e| AppError::ValidationError(format!("amount out of range: {}", e)))
}

/// Convert base units back to a human-readable decimal amount.
pub fn from_base_units(value: U256, decimals: i32) -> Result<BigDecimal, AppError> {
    let digits = BigInt::from_str(&value.to_string())
        .map_err(|e| AppError::InternalError(format!("invalid base unit value: {}", e)))?;

    Ok(BigDecimal::new(digits, decimals as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_units_scales_by_decimals() {
        let amount = BigDecimal::from_str("1.5").unwrap();
        let units = to_base_units(&amount, 18).unwrap();
        assert_eq!(units, U256::from_str("1500000000000000000").unwrap());

        let usdc = BigDecimal::from_str("2.25").unwrap();
        assert_eq!(to_base_units(&usdc, 6).unwrap(), U256::from(2_250_000u64));
    }

    #[test]
    fn test_to_base_units_truncates_dust() {
        let amount = BigDecimal::from_str("0.1234567").unwrap();
        assert_eq!(to_base_units(&amount, 6).unwrap(), U256::from(123_456u64));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let amount = BigDecimal::from_str("-1").unwrap();
        assert!(to_base_units(&amount, 18).is_err());
    }

    #[test]
    fn test_from_base_units_roundtrip() {
        let amount = BigDecimal::from_str("42.125").unwrap();
        let units = to_base_units(&amount, 8).unwrap();
        let back = from_base_units(units, 8).unwrap();
        assert_eq!(back, amount.with_scale(8));
    }
}
