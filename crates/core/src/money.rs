//! # Money Module
//!
//! Amount rules for the ledger. Netbank is single-currency: every amount is
//! a `rust_decimal::Decimal` with at most [`MAX_SCALE`] fractional digits,
//! matching the precision of stored account balances.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;

/// Maximum fractional digits carried by balances and transfer amounts.
pub const MAX_SCALE: u32 = 2;

/// Validate a transfer amount.
///
/// An amount is acceptable when it is strictly positive and representable
/// at balance precision. Trailing zeros are fine (`300.00` == `300`).
///
/// # Examples
/// ```
/// use netbank_core::validate_amount;
/// use rust_decimal::Decimal;
///
/// assert!(validate_amount(Decimal::new(30050, 2)).is_ok());
/// assert!(validate_amount(Decimal::ZERO).is_err());
/// ```
pub fn validate_amount(amount: Decimal) -> CoreResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::InvalidAmount(format!(
            "amount must be positive: {}",
            amount
        )));
    }
    if amount.normalize().scale() > MAX_SCALE {
        return Err(CoreError::InvalidAmount(format!(
            "amount has more than {} decimal places: {}",
            MAX_SCALE, amount
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_ok() {
        assert_eq!(validate_amount(dec!(300.00)).unwrap(), dec!(300.00));
        assert_eq!(validate_amount(dec!(0.01)).unwrap(), dec!(0.01));
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert!(validate_amount(dec!(0)).is_err());
        assert!(validate_amount(dec!(-1)).is_err());
        assert!(validate_amount(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_sub_paise_precision_rejected() {
        assert!(validate_amount(dec!(10.001)).is_err());
    }

    #[test]
    fn test_trailing_zeros_accepted() {
        // 5.100 normalizes to 5.1
        assert!(validate_amount(dec!(5.100)).is_ok());
    }
}
