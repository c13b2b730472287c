//! Order lifecycle service
//!
//! Creation validates every reference and prices the lines before anything
//! is written; the repository then stores the composite atomically.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, Order, OrderDraft, OrderFilter, OrderStatus, PricedLine,
    RepositoryProvider, TransitionPolicy,
};
use crate::domain::order::NOTES_MAX_LEN;
use crate::shared::{PaginatedResult, PaginationParams};

/// One requested line of a new order
#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    pub service_item_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub customer_id: i32,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

pub struct OrderService {
    repos: Arc<dyn RepositoryProvider>,
    policy: TransitionPolicy,
}

impl OrderService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: TransitionPolicy) -> Self {
        Self { repos, policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub async fn create_order(&self, cmd: CreateOrderCommand) -> DomainResult<Order> {
        if cmd.items.is_empty() {
            return Err(DomainError::Validation(
                "An order needs at least one item".into(),
            ));
        }
        if cmd.notes.as_ref().is_some_and(|n| n.chars().count() > NOTES_MAX_LEN) {
            return Err(DomainError::Validation(format!(
                "Notes must be at most {} characters",
                NOTES_MAX_LEN
            )));
        }

        let customer = self
            .repos
            .customers()
            .find_by_id(cmd.customer_id)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(cmd.customer_id))?;

        let mut lines = Vec::with_capacity(cmd.items.len());
        for line in cmd.items {
            let item = self
                .repos
                .service_items()
                .find_by_id(line.service_item_id)
                .await?
                .ok_or_else(|| DomainError::service_item_not_found(line.service_item_id))?;
            lines.push(PricedLine::price(&item, line.quantity, line.notes)?);
        }

        let draft = OrderDraft {
            customer_id: customer.id,
            pickup_date: cmd.pickup_date,
            delivery_date: cmd.delivery_date,
            notes: cmd.notes,
            lines,
        };

        let order = self.repos.orders().create(draft).await?;
        metrics::counter!("orders_created_total").increment(1);
        info!(
            order_id = order.id,
            customer_id = customer.id,
            items = order.items().len(),
            total = %order.total_amount(),
            "Order created"
        );
        Ok(order)
    }

    pub async fn get_order(&self, id: i32) -> DomainResult<Order> {
        self.repos
            .orders()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(id))
    }

    pub async fn list_orders(
        &self,
        filter: OrderFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Order>> {
        self.repos.orders().list(filter, page).await
    }

    /// Applies the configured transition policy, then persists the new status.
    pub async fn update_status(&self, id: i32, status: OrderStatus) -> DomainResult<Order> {
        let mut order = self.get_order(id).await?;
        let previous = order.status;

        if let Err(e) = order.change_status(status, self.policy) {
            warn!(order_id = id, from = %previous, to = %status, policy = %self.policy, "Status change rejected");
            return Err(e);
        }

        self.repos
            .orders()
            .update_status(id, order.status, order.updated_at)
            .await?;

        metrics::counter!("order_status_updates_total", "status" => status.as_str()).increment(1);
        info!(order_id = id, from = %previous, to = %status, "Order status updated");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CustomerDraft, ServiceCategory, ServiceItem, ServiceItemDraft,
    };
    use crate::infrastructure::storage::InMemoryStorage;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct Setup {
        repos: Arc<InMemoryStorage>,
        service: OrderService,
        customer_id: i32,
        wash_fold: ServiceItem,
        iron_only: ServiceItem,
    }

    async fn setup(policy: TransitionPolicy) -> Setup {
        let repos = Arc::new(InMemoryStorage::new());
        let customer = repos
            .customers()
            .create(CustomerDraft {
                name: "Amara Okafor".into(),
                phone: "+2348012345678".into(),
                email: Some("amara@email.com".into()),
                address: None,
            })
            .await
            .unwrap();
        let wash_fold = repos
            .service_items()
            .create(ServiceItemDraft {
                name: "Wash & Fold".into(),
                category: ServiceCategory::Wash,
                price_per_unit: dec("1500.00"),
                unit_type: "KG".into(),
            })
            .await
            .unwrap();
        let iron_only = repos
            .service_items()
            .create(ServiceItemDraft {
                name: "Iron Only".into(),
                category: ServiceCategory::Iron,
                price_per_unit: dec("500.00"),
                unit_type: "PIECE".into(),
            })
            .await
            .unwrap();

        Setup {
            service: OrderService::new(repos.clone(), policy),
            repos,
            customer_id: customer.id,
            wash_fold,
            iron_only,
        }
    }

    fn line(item: &ServiceItem, quantity: i32) -> OrderLineRequest {
        OrderLineRequest {
            service_item_id: item.id,
            quantity,
            notes: None,
        }
    }

    fn command(customer_id: i32, items: Vec<OrderLineRequest>) -> CreateOrderCommand {
        CreateOrderCommand {
            customer_id,
            pickup_date: None,
            delivery_date: None,
            notes: None,
            items,
        }
    }

    #[tokio::test]
    async fn create_single_line_order() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let order = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 2)]))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount(), dec("3000.00"));
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].subtotal, dec("3000.00"));
        assert_eq!(order.customer.id, s.customer_id);
    }

    #[tokio::test]
    async fn create_multi_line_order_sums_subtotals() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let order = s
            .service
            .create_order(command(
                s.customer_id,
                vec![line(&s.wash_fold, 2), line(&s.iron_only, 3)],
            ))
            .await
            .unwrap();

        assert_eq!(order.total_amount(), dec("4500.00"));
        let sum: Decimal = order.items().iter().map(|i| i.subtotal).sum();
        assert_eq!(sum, order.total_amount());
        for item in order.items() {
            assert_eq!(item.subtotal, item.unit_price * Decimal::from(item.quantity));
        }
    }

    #[tokio::test]
    async fn unknown_customer_persists_nothing() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let err = s
            .service
            .create_order(command(999, vec![line(&s.wash_fold, 1)]))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("999"));
        assert!(matches!(err, DomainError::NotFound { entity: "Customer", .. }));
        assert_eq!(s.repos.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_service_item_persists_nothing() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let mut items = vec![line(&s.wash_fold, 1)];
        items.push(OrderLineRequest {
            service_item_id: 999,
            quantity: 1,
            notes: None,
        });
        let err = s
            .service
            .create_order(command(s.customer_id, items))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "ServiceItem", .. }));
        assert!(err.to_string().contains("999"));
        assert_eq!(s.repos.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_items_and_bad_quantity_are_rejected() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        assert!(matches!(
            s.service.create_order(command(s.customer_id, vec![])).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            s.service
                .create_order(command(s.customer_id, vec![line(&s.wash_fold, 0)]))
                .await,
            Err(DomainError::InvalidQuantity(0))
        ));
        assert_eq!(s.repos.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn long_notes_are_rejected() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let mut cmd = command(s.customer_id, vec![line(&s.wash_fold, 1)]);
        cmd.notes = Some("x".repeat(NOTES_MAX_LEN + 1));
        assert!(matches!(
            s.service.create_order(cmd).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn walk_through_happy_path() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let order = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 1)]))
            .await
            .unwrap();

        for status in [
            OrderStatus::PickedUp,
            OrderStatus::Processing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ] {
            let updated = s.service.update_status(order.id, status).await.unwrap();
            assert_eq!(updated.status, status);
            assert_eq!(s.service.get_order(order.id).await.unwrap().status, status);
        }

        let reloaded = s.service.get_order(order.id).await.unwrap();
        assert_eq!(reloaded.total_amount(), order.total_amount());
        assert!(reloaded.updated_at >= reloaded.created_at);
    }

    #[tokio::test]
    async fn unrestricted_allows_any_status_from_any_status() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let order = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.iron_only, 1)]))
            .await
            .unwrap();

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                s.service.update_status(order.id, from).await.unwrap();
                let updated = s.service.update_status(order.id, to).await.unwrap();
                assert_eq!(updated.status, to);
            }
        }
    }

    #[tokio::test]
    async fn forward_only_rejects_skipping_ahead() {
        let s = setup(TransitionPolicy::ForwardOnly).await;
        let order = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 1)]))
            .await
            .unwrap();

        let err = s
            .service
            .update_status(order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(
            s.service.get_order(order.id).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn terminal_cancel_rejects_reopening() {
        let s = setup(TransitionPolicy::TerminalCancel).await;
        let order = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 1)]))
            .await
            .unwrap();

        s.service
            .update_status(order.id, OrderStatus::Cancelled)
            .await
            .unwrap();
        let err = s
            .service
            .update_status(order.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        assert!(matches!(
            s.service.get_order(404).await,
            Err(DomainError::NotFound { entity: "Order", .. })
        ));
        assert!(matches!(
            s.service.update_status(404, OrderStatus::Ready).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn price_change_does_not_touch_existing_orders() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let order = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 2)]))
            .await
            .unwrap();

        s.repos
            .service_items()
            .update(
                s.wash_fold.id,
                ServiceItemDraft {
                    name: s.wash_fold.name.clone(),
                    category: s.wash_fold.category,
                    price_per_unit: dec("1800.00"),
                    unit_type: s.wash_fold.unit_type.clone(),
                },
            )
            .await
            .unwrap();

        let reloaded = s.service.get_order(order.id).await.unwrap();
        assert_eq!(reloaded.total_amount(), dec("3000.00"));
        assert_eq!(reloaded.items()[0].unit_price, dec("1500.00"));

        let newer = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 2)]))
            .await
            .unwrap();
        assert_eq!(newer.total_amount(), dec("3600.00"));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let s = setup(TransitionPolicy::Unrestricted).await;
        let a = s
            .service
            .create_order(command(s.customer_id, vec![line(&s.wash_fold, 1)]))
            .await
            .unwrap();
        s.service
            .create_order(command(s.customer_id, vec![line(&s.iron_only, 1)]))
            .await
            .unwrap();
        s.service.update_status(a.id, OrderStatus::Ready).await.unwrap();

        let ready = s
            .service
            .list_orders(
                OrderFilter {
                    status: Some(OrderStatus::Ready),
                    customer_id: None,
                },
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(ready.total, 1);
        assert_eq!(ready.items[0].id, a.id);
    }
}
