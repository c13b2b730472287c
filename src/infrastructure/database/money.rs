//! Money columns hold exact minor units (hundredths) as BIGINT.

use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};
use crate::shared::validations::MONEY_SCALE;

/// Converts an amount to minor units. Amounts with more than two
/// fractional digits are rejected rather than rounded.
pub fn to_minor(amount: Decimal) -> DomainResult<i64> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(DomainError::Validation(format!(
            "Amount {} has more than {} fractional digits",
            amount, MONEY_SCALE
        )));
    }
    let mut scaled = amount;
    scaled.rescale(MONEY_SCALE);
    i64::try_from(scaled.mantissa())
        .map_err(|_| DomainError::AmountOutOfRange(format!("{} does not fit a money column", amount)))
}

pub fn from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, MONEY_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn converts_to_hundredths() {
        assert_eq!(to_minor(Decimal::from_str("1500.00").unwrap()).unwrap(), 150_000);
        assert_eq!(to_minor(Decimal::from_str("1500").unwrap()).unwrap(), 150_000);
        assert_eq!(to_minor(Decimal::from_str("0.5").unwrap()).unwrap(), 50);
        assert_eq!(to_minor(Decimal::from_str("12.3400").unwrap()).unwrap(), 1234);
    }

    #[test]
    fn rejects_sub_cent_amounts() {
        assert!(to_minor(Decimal::from_str("0.001").unwrap()).is_err());
    }

    #[test]
    fn rejects_amounts_beyond_bigint() {
        let amount = Decimal::new(i64::MAX, 2) + Decimal::ONE;
        assert!(matches!(to_minor(amount), Err(DomainError::AmountOutOfRange(_))));
    }

    #[test]
    fn from_minor_keeps_two_places() {
        let amount = from_minor(300_000);
        assert_eq!(amount.to_string(), "3000.00");
        assert_eq!(amount, Decimal::from_str("3000").unwrap());
    }
}
