//! Pricing
//!
//! Cart amounts stay as exact decimals until they are shown to a customer. This module does
//! the final rounding and turns amounts into soles for display.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Money in the storefront's currency.
pub type Soles = Money<'static, Currency>;

/// Errors raised while preparing amounts for display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The amount does not fit in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Round to cents, halves away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an exact amount into soles, rounding to cents.
///
/// # Errors
///
/// - [`PricingError::OutOfRange`]: the rounded amount overflows an `i64` of cents.
pub fn to_soles(amount: Decimal) -> Result<Soles, PricingError> {
    let minor = round_amount(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(PricingError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor, iso::PEN))
}

/// Plain two-decimal rendering, e.g. `24.00` or `-3.50`.
pub fn format_amount(money: &Soles) -> String {
    let minor = money.to_minor_units();
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();

    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Symbol printed before amounts in order messages and tables.
pub fn currency_label(money: &Soles) -> &'static str {
    let currency = money.currency();

    if currency.iso_alpha_code == iso::PEN.iso_alpha_code {
        "S/."
    } else {
        currency.iso_alpha_code
    }
}

/// Render an exact amount with the currency label, e.g. `S/. 24.00`.
///
/// # Errors
///
/// - [`PricingError::OutOfRange`]: the rounded amount overflows an `i64` of cents.
pub fn display_price(amount: Decimal) -> Result<String, PricingError> {
    let soles = to_soles(amount)?;

    Ok(format!("{} {}", currency_label(&soles), format_amount(&soles)))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_amount(dec!(2.985)), dec!(2.99));
        assert_eq!(round_amount(dec!(2.984)), dec!(2.98));
        assert_eq!(round_amount(dec!(-2.985)), dec!(-2.99));
    }

    #[test]
    fn converts_to_minor_units() -> TestResult {
        let soles = to_soles(dec!(16.915))?;

        assert_eq!(soles, Money::from_minor(1692, iso::PEN));

        Ok(())
    }

    #[test]
    fn formats_with_two_decimals() -> TestResult {
        assert_eq!(format_amount(&to_soles(dec!(24))?), "24.00");
        assert_eq!(format_amount(&to_soles(dec!(0.5))?), "0.50");
        assert_eq!(format_amount(&to_soles(dec!(-3.5))?), "-3.50");
        assert_eq!(format_amount(&to_soles(Decimal::ZERO)?), "0.00");

        Ok(())
    }

    #[test]
    fn labels_soles() -> TestResult {
        assert_eq!(currency_label(&to_soles(dec!(1))?), "S/.");
        assert_eq!(currency_label(&Money::from_minor(100, iso::USD)), "USD");

        Ok(())
    }

    #[test]
    fn display_price_combines_label_and_amount() -> TestResult {
        assert_eq!(display_price(dec!(45.00))?, "S/. 45.00");

        Ok(())
    }

    #[test]
    fn out_of_range_amount_is_an_error() {
        let result = to_soles(Decimal::MAX);

        assert_eq!(result, Err(PricingError::OutOfRange(Decimal::MAX)));
    }
}
