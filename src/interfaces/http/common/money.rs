use rust_decimal::Decimal;

use crate::shared::validations::MONEY_SCALE;

/// Renders an amount with exactly two fractional digits ("3000.00").
pub fn money(value: Decimal) -> String {
    let mut value = value.round_dp(MONEY_SCALE);
    value.rescale(MONEY_SCALE);
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_two_places() {
        assert_eq!(money(Decimal::from(3000)), "3000.00");
        assert_eq!(money(Decimal::new(45005, 1)), "4500.50");
        assert_eq!(money(Decimal::ZERO), "0.00");
    }
}
