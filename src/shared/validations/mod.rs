use rust_decimal::Decimal;
use validator::ValidationError;

/// Money columns keep two fractional digits.
pub const MONEY_SCALE: u32 = 2;

/// Rejects strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Non-negative decimal with at most two fractional digits.
pub fn money_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::new("too_many_decimals"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(not_blank("Amara").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn money_amount_rules() {
        assert!(money_amount(&Decimal::new(150000, 2)).is_ok());
        assert!(money_amount(&Decimal::ZERO).is_ok());
        // 1500.000 normalizes to 1500
        assert!(money_amount(&Decimal::new(1500000, 3)).is_ok());
        assert!(money_amount(&Decimal::new(1, 3)).is_err());
        assert!(money_amount(&Decimal::new(-100, 2)).is_err());
    }
}
