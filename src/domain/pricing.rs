//! Pricing engine
//!
//! Pure fixed-point arithmetic for order lines and totals. Results keep the
//! native precision of [`Decimal`]; nothing is rounded here.

use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

/// `unit_price × quantity`. Quantity must be positive.
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Result<Decimal, DomainError> {
    if quantity <= 0 {
        return Err(DomainError::InvalidQuantity(quantity as i64));
    }
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| {
            DomainError::AmountOutOfRange(format!("{} x {} overflows", unit_price, quantity))
        })
}

/// Sum of line subtotals, zero for no lines.
pub fn order_total<I>(subtotals: I) -> Result<Decimal, DomainError>
where
    I: IntoIterator<Item = Decimal>,
{
    subtotals.into_iter().try_fold(Decimal::ZERO, |acc, s| {
        acc.checked_add(s)
            .ok_or_else(|| DomainError::AmountOutOfRange("order total overflows".into()))
    })
}
