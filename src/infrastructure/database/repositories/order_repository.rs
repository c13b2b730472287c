//! SeaORM implementation of OrderRepository
//!
//! An order row plus its item rows form one aggregate; both are written in
//! a single database transaction and read back together.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use super::customer_repository::customer_to_domain;
use super::db_err;
use super::service_item_repository::service_item_to_domain;
use crate::domain::{
    DomainError, DomainResult, Order, OrderDraft, OrderFilter, OrderItem, OrderParts,
    OrderRepository, OrderStatus,
};
use crate::infrastructure::database::entities::{customer, order, order_item, service_item};
use crate::infrastructure::database::money::{from_minor, to_minor};
use crate::shared::{PaginatedResult, PaginationParams};

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(s: order::OrderStatus) -> OrderStatus {
    match s {
        order::OrderStatus::Pending => OrderStatus::Pending,
        order::OrderStatus::PickedUp => OrderStatus::PickedUp,
        order::OrderStatus::Processing => OrderStatus::Processing,
        order::OrderStatus::Ready => OrderStatus::Ready,
        order::OrderStatus::Delivered => OrderStatus::Delivered,
        order::OrderStatus::Cancelled => OrderStatus::Cancelled,
    }
}

fn status_to_entity(s: OrderStatus) -> order::OrderStatus {
    match s {
        OrderStatus::Pending => order::OrderStatus::Pending,
        OrderStatus::PickedUp => order::OrderStatus::PickedUp,
        OrderStatus::Processing => order::OrderStatus::Processing,
        OrderStatus::Ready => order::OrderStatus::Ready,
        OrderStatus::Delivered => order::OrderStatus::Delivered,
        OrderStatus::Cancelled => order::OrderStatus::Cancelled,
    }
}

fn filtered(filter: OrderFilter) -> Select<order::Entity> {
    let mut query = order::Entity::find();
    if let Some(status) = filter.status {
        query = query.filter(order::Column::Status.eq(status_to_entity(status)));
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.filter(order::Column::CustomerId.eq(customer_id));
    }
    query
}

// ── SeaOrmOrderRepository ───────────────────────────────────────

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads customers, items and catalog rows for `models` and assembles
    /// the aggregates in the same order.
    async fn hydrate(&self, models: Vec<order::Model>) -> DomainResult<Vec<Order>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let customer_ids: Vec<i32> = models.iter().map(|m| m.customer_id).collect();

        let customers: HashMap<i32, customer::Model> = customer::Entity::find()
            .filter(customer::Column::Id.is_in(customer_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let item_models = order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_item::Column::OrderId)
            .order_by_asc(order_item::Column::Position)
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let service_ids: Vec<i32> = item_models.iter().map(|i| i.service_item_id).collect();
        let services: HashMap<i32, service_item::Model> = service_item::Entity::find()
            .filter(service_item::Column::Id.is_in(service_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for item in item_models {
            let service = services.get(&item.service_item_id).cloned().ok_or_else(|| {
                DomainError::Invariant(format!(
                    "order item {} references missing service item {}",
                    item.id, item.service_item_id
                ))
            })?;
            items_by_order.entry(item.order_id).or_default().push(OrderItem {
                id: item.id,
                order_id: item.order_id,
                service_item: service_item_to_domain(service),
                quantity: item.quantity,
                unit_price: from_minor(item.unit_price),
                subtotal: from_minor(item.subtotal),
                notes: item.notes,
            });
        }

        let mut orders = Vec::with_capacity(models.len());
        for m in models {
            let customer = customers.get(&m.customer_id).cloned().ok_or_else(|| {
                DomainError::Invariant(format!(
                    "order {} references missing customer {}",
                    m.id, m.customer_id
                ))
            })?;
            let parts = OrderParts {
                id: m.id,
                customer: customer_to_domain(customer),
                status: status_to_domain(m.status),
                pickup_date: m.pickup_date,
                delivery_date: m.delivery_date,
                notes: m.notes,
                items: items_by_order.remove(&m.id).unwrap_or_default(),
                created_at: m.created_at,
                updated_at: m.updated_at,
            };
            let order = Order::restore(parts, from_minor(m.total_amount)).inspect_err(|e| {
                error!("Corrupt order {}: {}", m.id, e);
            })?;
            orders.push(order);
        }
        Ok(orders)
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn create(&self, draft: OrderDraft) -> DomainResult<Order> {
        let now = Utc::now();
        let total = to_minor(draft.total_amount()?)?;

        let txn = self.db.begin().await.map_err(db_err)?;

        let header = order::ActiveModel {
            id: NotSet,
            customer_id: Set(draft.customer_id),
            status: Set(status_to_entity(draft.status())),
            total_amount: Set(total),
            pickup_date: Set(draft.pickup_date),
            delivery_date: Set(draft.delivery_date),
            notes: Set(draft.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for (position, line) in draft.lines.into_iter().enumerate() {
            order_item::ActiveModel {
                id: NotSet,
                order_id: Set(header.id),
                service_item_id: Set(line.service_item_id),
                position: Set(position as i32),
                quantity: Set(line.quantity),
                unit_price: Set(to_minor(line.unit_price)?),
                subtotal: Set(to_minor(line.subtotal)?),
                notes: Set(line.notes),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        info!("Order saved: {} (customer {}, total {})", header.id, header.customer_id, from_minor(total));

        self.find_by_id(header.id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(header.id))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Order>> {
        let model = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    async fn list(
        &self,
        filter: OrderFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Order>> {
        let query = filtered(filter);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!("Order list: {} of {} (page {})", models.len(), total, page.page);
        let items = self.hydrate(models).await?;
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let existing = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::order_not_found(id));
        };

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(status_to_entity(status));
        active.updated_at = Set(updated_at);
        active.update(&self.db).await.map_err(db_err)?;

        info!("Order {} status -> {}", id, status);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        order::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn count_by_status(&self, status: OrderStatus) -> DomainResult<u64> {
        filtered(OrderFilter {
            status: Some(status),
            customer_id: None,
        })
        .count(&self.db)
        .await
        .map_err(db_err)
    }

    async fn sum_total_by_status(&self, status: OrderStatus) -> DomainResult<Decimal> {
        let sum: SimpleExpr = Func::cast_as(
            Func::sum(Expr::col(order::Column::TotalAmount)),
            Alias::new("BIGINT"),
        )
        .into();

        let total: Option<Option<i64>> = order::Entity::find()
            .select_only()
            .column_as(sum, "total")
            .filter(order::Column::Status.eq(status_to_entity(status)))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(from_minor(total.flatten().unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CustomerDraft, CustomerRepository, PricedLine, ServiceCategory, ServiceItem,
        ServiceItemDraft, ServiceItemRepository,
    };
    use crate::infrastructure::database::repositories::customer_repository::SeaOrmCustomerRepository;
    use crate::infrastructure::database::repositories::service_item_repository::SeaOrmServiceItemRepository;
    use crate::infrastructure::database::test_db;
    use sea_orm::ConnectionTrait;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct Fixture {
        db: DatabaseConnection,
        orders: SeaOrmOrderRepository,
        customer_id: i32,
        wash: ServiceItem,
        iron: ServiceItem,
    }

    async fn fixture() -> Fixture {
        let db = test_db().await;
        let customers = SeaOrmCustomerRepository::new(db.clone());
        let catalog = SeaOrmServiceItemRepository::new(db.clone());

        let customer = customers
            .create(CustomerDraft {
                name: "Amara Okafor".into(),
                phone: "+2348012345678".into(),
                email: None,
                address: None,
            })
            .await
            .unwrap();
        let wash = catalog
            .create(ServiceItemDraft {
                name: "Wash & Fold".into(),
                category: ServiceCategory::Wash,
                price_per_unit: dec("1500.00"),
                unit_type: "KG".into(),
            })
            .await
            .unwrap();
        let iron = catalog
            .create(ServiceItemDraft {
                name: "Iron Only".into(),
                category: ServiceCategory::Iron,
                price_per_unit: dec("500.00"),
                unit_type: "PIECE".into(),
            })
            .await
            .unwrap();

        Fixture {
            orders: SeaOrmOrderRepository::new(db.clone()),
            db,
            customer_id: customer.id,
            wash,
            iron,
        }
    }

    fn draft(fx: &Fixture, lines: &[(&ServiceItem, i32)]) -> OrderDraft {
        OrderDraft {
            customer_id: fx.customer_id,
            pickup_date: None,
            delivery_date: None,
            notes: Some("front desk".into()),
            lines: lines
                .iter()
                .map(|(svc, qty)| PricedLine::price(svc, *qty, None).unwrap())
                .collect(),
        }
    }

    #[tokio::test]
    async fn create_materializes_order_with_items() {
        let fx = fixture().await;
        let order = fx
            .orders
            .create(draft(&fx, &[(&fx.wash, 2), (&fx.iron, 3)]))
            .await
            .unwrap();

        assert!(order.id > 0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount(), dec("4500.00"));
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[0].service_item.name, "Wash & Fold");
        assert_eq!(order.items()[1].subtotal, dec("1500.00"));
        assert_eq!(order.customer.name, "Amara Okafor");
        assert!(order.updated_at >= order.created_at);
    }

    #[tokio::test]
    async fn failed_line_rolls_back_whole_order() {
        let fx = fixture().await;
        let mut bad = draft(&fx, &[(&fx.wash, 1)]);
        bad.lines.push(PricedLine {
            service_item_id: 9999,
            quantity: 1,
            unit_price: dec("1.00"),
            subtotal: dec("1.00"),
            notes: None,
        });

        assert!(fx.orders.create(bad).await.is_err());
        assert_eq!(fx.orders.count().await.unwrap(), 0);
        assert_eq!(order_item::Entity::find().count(&fx.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filtered() {
        let fx = fixture().await;
        let first = fx.orders.create(draft(&fx, &[(&fx.wash, 1)])).await.unwrap();
        let second = fx.orders.create(draft(&fx, &[(&fx.iron, 1)])).await.unwrap();
        fx.orders
            .update_status(first.id, OrderStatus::Delivered, Utc::now())
            .await
            .unwrap();

        let all = fx
            .orders
            .list(OrderFilter::default(), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(all.total, 2);
        assert_eq!(all.items[0].id, second.id);

        let delivered = fx
            .orders
            .list(
                OrderFilter {
                    status: Some(OrderStatus::Delivered),
                    customer_id: None,
                },
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(delivered.total, 1);
        assert_eq!(delivered.items[0].id, first.id);

        let other_customer = fx
            .orders
            .list(
                OrderFilter {
                    status: None,
                    customer_id: Some(fx.customer_id + 100),
                },
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(other_customer.total, 0);
    }

    #[tokio::test]
    async fn update_status_of_missing_order_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .orders
            .update_status(404, OrderStatus::Ready, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Order", .. }));
    }

    #[tokio::test]
    async fn aggregates_by_status() {
        let fx = fixture().await;
        assert_eq!(
            fx.orders.sum_total_by_status(OrderStatus::Delivered).await.unwrap(),
            Decimal::ZERO
        );

        let a = fx.orders.create(draft(&fx, &[(&fx.wash, 2)])).await.unwrap();
        let b = fx.orders.create(draft(&fx, &[(&fx.iron, 10)])).await.unwrap();
        fx.orders.create(draft(&fx, &[(&fx.iron, 1)])).await.unwrap();
        for id in [a.id, b.id] {
            fx.orders
                .update_status(id, OrderStatus::Delivered, Utc::now())
                .await
                .unwrap();
        }

        assert_eq!(fx.orders.count().await.unwrap(), 3);
        assert_eq!(fx.orders.count_by_status(OrderStatus::Pending).await.unwrap(), 1);
        assert_eq!(fx.orders.count_by_status(OrderStatus::Delivered).await.unwrap(), 2);
        assert_eq!(
            fx.orders.sum_total_by_status(OrderStatus::Delivered).await.unwrap(),
            dec("8000.00")
        );
    }

    #[tokio::test]
    async fn tampered_total_is_reported_as_invariant() {
        let fx = fixture().await;
        let order = fx.orders.create(draft(&fx, &[(&fx.wash, 2)])).await.unwrap();

        fx.db
            .execute_unprepared(&format!(
                "UPDATE orders SET total_amount = 1 WHERE id = {}",
                order.id
            ))
            .await
            .unwrap();

        let err = fx.orders.find_by_id(order.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Invariant(_)));
    }

    #[tokio::test]
    async fn catalog_price_change_keeps_snapshot() {
        let fx = fixture().await;
        let order = fx.orders.create(draft(&fx, &[(&fx.wash, 2)])).await.unwrap();

        SeaOrmServiceItemRepository::new(fx.db.clone())
            .update(
                fx.wash.id,
                ServiceItemDraft {
                    name: "Wash & Fold".into(),
                    category: ServiceCategory::Wash,
                    price_per_unit: dec("2000.00"),
                    unit_type: "KG".into(),
                },
            )
            .await
            .unwrap();

        let reloaded = fx.orders.find_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(reloaded.total_amount(), dec("3000.00"));
        assert_eq!(reloaded.items()[0].unit_price, dec("1500.00"));
        assert_eq!(reloaded.items()[0].service_item.price_per_unit, dec("2000.00"));
    }
}
