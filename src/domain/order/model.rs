//! Order aggregate root and its line items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::status::{OrderStatus, TransitionPolicy};
use crate::domain::catalog::ServiceItem;
use crate::domain::customer::Customer;
use crate::domain::pricing::{line_subtotal, order_total};
use crate::shared::errors::DomainError;

/// Maximum length of order notes
pub const NOTES_MAX_LEN: usize = 500;

/// One service line of an order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    /// Current catalog details of the referenced item
    pub service_item: ServiceItem,
    pub quantity: i32,
    /// Price captured when the order was created
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
}

/// Everything an [`Order`] is made of, except its total.
#[derive(Debug, Clone)]
pub struct OrderParts {
    pub id: i32,
    pub customer: Customer,
    pub status: OrderStatus,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer's order. The total is always the sum of the line subtotals.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i32,
    pub customer: Customer,
    pub status: OrderStatus,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    items: Vec<OrderItem>,
    total_amount: Decimal,
}

impl Order {
    /// Builds an order, deriving the total from its items.
    pub fn assemble(parts: OrderParts) -> Result<Self, DomainError> {
        let total_amount = order_total(parts.items.iter().map(|i| i.subtotal))?;
        Ok(Self {
            id: parts.id,
            customer: parts.customer,
            status: parts.status,
            pickup_date: parts.pickup_date,
            delivery_date: parts.delivery_date,
            notes: parts.notes,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
            items: parts.items,
            total_amount,
        })
    }

    /// Rebuilds a persisted order and checks it against the stored total.
    pub fn restore(parts: OrderParts, stored_total: Decimal) -> Result<Self, DomainError> {
        let order = Self::assemble(parts)?;
        if order.total_amount != stored_total {
            return Err(DomainError::Invariant(format!(
                "order {} stores total {} but its items sum to {}",
                order.id, stored_total, order.total_amount
            )));
        }
        for item in &order.items {
            match line_subtotal(item.unit_price, item.quantity) {
                Ok(expected) if expected == item.subtotal => {}
                _ => {
                    return Err(DomainError::Invariant(format!(
                        "order item {} stores subtotal {} for {} x {}",
                        item.id, item.subtotal, item.unit_price, item.quantity
                    )))
                }
            }
        }
        Ok(order)
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    /// Moves the order to `to` if `policy` allows it and touches `updated_at`.
    pub fn change_status(
        &mut self,
        to: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<(), DomainError> {
        policy.check(self.status, to)?;
        self.status = to;
        self.updated_at = Utc::now().max(self.created_at);
        Ok(())
    }
}

/// A priced line ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub service_item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
}

impl PricedLine {
    pub fn price(item: &ServiceItem, quantity: i32, notes: Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            service_item_id: item.id,
            quantity,
            unit_price: item.price_per_unit,
            subtotal: line_subtotal(item.price_per_unit, quantity)?,
            notes,
        })
    }
}

/// A validated, priced order that has not been stored yet.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_id: i32,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub lines: Vec<PricedLine>,
}

impl OrderDraft {
    pub fn total_amount(&self) -> Result<Decimal, DomainError> {
        order_total(self.lines.iter().map(|l| l.subtotal))
    }

    /// New orders always start out pending.
    pub fn status(&self) -> OrderStatus {
        OrderStatus::Pending
    }
}

/// Optional narrowing for order listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ServiceCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service(id: i32, price: &str) -> ServiceItem {
        ServiceItem {
            id,
            name: format!("Service {}", id),
            category: ServiceCategory::Wash,
            price_per_unit: dec(price),
            unit_type: "KG".into(),
        }
    }

    fn customer() -> Customer {
        let now = Utc::now();
        Customer {
            id: 1,
            name: "Amara Okafor".into(),
            phone: "+2348012345678".into(),
            email: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn item(id: i32, service_item: ServiceItem, quantity: i32) -> OrderItem {
        let subtotal = line_subtotal(service_item.price_per_unit, quantity).unwrap();
        OrderItem {
            id,
            order_id: 10,
            unit_price: service_item.price_per_unit,
            service_item,
            quantity,
            subtotal,
            notes: None,
        }
    }

    fn parts(items: Vec<OrderItem>) -> OrderParts {
        let now = Utc::now();
        OrderParts {
            id: 10,
            customer: customer(),
            status: OrderStatus::Pending,
            pickup_date: None,
            delivery_date: None,
            notes: None,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn assemble_derives_total() {
        let order = Order::assemble(parts(vec![
            item(1, service(1, "1500.00"), 2),
            item(2, service(2, "500.00"), 3),
        ]))
        .unwrap();
        assert_eq!(order.total_amount(), dec("4500.00"));
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[0].id, 1);
    }

    #[test]
    fn restore_rejects_mismatched_total() {
        let p = parts(vec![item(1, service(1, "1500.00"), 2)]);
        assert!(Order::restore(p.clone(), dec("3000.00")).is_ok());
        assert!(matches!(
            Order::restore(p, dec("2999.99")),
            Err(DomainError::Invariant(_))
        ));
    }

    #[test]
    fn restore_rejects_mismatched_subtotal() {
        let mut line = item(1, service(1, "1500.00"), 2);
        line.subtotal = dec("2000.00");
        let p = parts(vec![line]);
        assert!(matches!(
            Order::restore(p, dec("2000.00")),
            Err(DomainError::Invariant(_))
        ));
    }

    #[test]
    fn restore_trusts_snapshot_over_catalog() {
        // Catalog price moved to 2000 after the order was placed at 1500
        let mut line = item(1, service(1, "1500.00"), 2);
        line.service_item.price_per_unit = dec("2000.00");
        let order = Order::restore(parts(vec![line]), dec("3000.00")).unwrap();
        assert_eq!(order.total_amount(), dec("3000.00"));
    }

    #[test]
    fn change_status_respects_policy() {
        let mut order = Order::assemble(parts(vec![item(1, service(1, "1500.00"), 1)])).unwrap();
        let before = order.updated_at;

        order
            .change_status(OrderStatus::Delivered, TransitionPolicy::Unrestricted)
            .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.updated_at >= before);
        assert_eq!(order.total_amount(), dec("1500.00"));

        let err = order
            .change_status(OrderStatus::Pending, TransitionPolicy::ForwardOnly)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn priced_line_snapshots_price() {
        let svc = service(3, "2000.00");
        let line = PricedLine::price(&svc, 5, Some("starch".into())).unwrap();
        assert_eq!(line.unit_price, dec("2000.00"));
        assert_eq!(line.subtotal, dec("10000.00"));
        assert!(PricedLine::price(&svc, 0, None).is_err());
    }

    #[test]
    fn draft_starts_pending() {
        let draft = OrderDraft {
            customer_id: 1,
            pickup_date: None,
            delivery_date: None,
            notes: None,
            lines: vec![PricedLine::price(&service(1, "1500.00"), 2, None).unwrap()],
        };
        assert_eq!(draft.status(), OrderStatus::Pending);
        assert_eq!(draft.total_amount().unwrap(), dec("3000.00"));
    }

    #[test]
    fn draft_total_overflow_is_an_error() {
        let svc = service(1, "92233720368547758.07");
        let line = PricedLine::price(&svc, i32::MAX, None).unwrap();
        let draft = OrderDraft {
            customer_id: 1,
            pickup_date: None,
            delivery_date: None,
            notes: None,
            lines: vec![line; 500],
        };
        assert!(matches!(draft.total_amount(), Err(DomainError::AmountOutOfRange(_))));
    }
}
