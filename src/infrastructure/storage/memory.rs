//! In-memory storage implementation
//!
//! Implements every repository over `DashMap`s. Orders are kept as raw rows
//! and assembled on read, like the database backend does.

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::domain::{
    Customer, CustomerDraft, CustomerRepository, DomainError, DomainResult, NewUser, Order,
    OrderDraft, OrderFilter, OrderItem, OrderParts, OrderRepository, OrderStatus,
    RepositoryProvider, ServiceItem, ServiceItemDraft, ServiceItemRepository, User,
    UserRepository,
};
use crate::domain::pricing::order_total;
use crate::shared::{PaginatedResult, PaginationParams};

#[derive(Debug, Clone)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    status: OrderStatus,
    total_amount: Decimal,
    pickup_date: Option<DateTime<Utc>>,
    delivery_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Insertion sequence, breaks ties between equal timestamps
    seq: u64,
}

#[derive(Debug, Clone)]
struct OrderItemRow {
    id: i32,
    service_item_id: i32,
    quantity: i32,
    unit_price: Decimal,
    subtotal: Decimal,
    notes: Option<String>,
}

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    customers: DashMap<i32, Customer>,
    service_items: DashMap<i32, ServiceItem>,
    orders: DashMap<i32, OrderRow>,
    order_items: DashMap<i32, Vec<OrderItemRow>>,
    users: DashMap<String, User>,
    customer_counter: AtomicI32,
    service_item_counter: AtomicI32,
    order_counter: AtomicI32,
    order_item_counter: AtomicI32,
    order_seq: AtomicU64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            service_items: DashMap::new(),
            orders: DashMap::new(),
            order_items: DashMap::new(),
            users: DashMap::new(),
            customer_counter: AtomicI32::new(1),
            service_item_counter: AtomicI32::new(1),
            order_counter: AtomicI32::new(1),
            order_item_counter: AtomicI32::new(1),
            order_seq: AtomicU64::new(1),
        }
    }

    fn assemble(&self, row: &OrderRow) -> DomainResult<Order> {
        let customer = self
            .customers
            .get(&row.customer_id)
            .map(|c| c.clone())
            .ok_or_else(|| DomainError::customer_not_found(row.customer_id))?;

        let rows = self
            .order_items
            .get(&row.id)
            .map(|items| items.clone())
            .unwrap_or_default();

        let mut items = Vec::with_capacity(rows.len());
        for item in rows {
            let service_item = self
                .service_items
                .get(&item.service_item_id)
                .map(|s| s.clone())
                .ok_or_else(|| DomainError::service_item_not_found(item.service_item_id))?;
            items.push(OrderItem {
                id: item.id,
                order_id: row.id,
                service_item,
                quantity: item.quantity,
                unit_price: item.unit_price,
                subtotal: item.subtotal,
                notes: item.notes,
            });
        }

        Order::restore(
            OrderParts {
                id: row.id,
                customer,
                status: row.status,
                pickup_date: row.pickup_date,
                delivery_date: row.delivery_date,
                notes: row.notes.clone(),
                items,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            row.total_amount,
        )
    }

    fn matching_rows(&self, filter: OrderFilter) -> Vec<OrderRow> {
        self.orders
            .iter()
            .filter(|e| filter.status.map_or(true, |s| e.status == s))
            .filter(|e| filter.customer_id.map_or(true, |c| e.customer_id == c))
            .map(|e| e.value().clone())
            .collect()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn paginate<T>(mut items: Vec<T>, page: PaginationParams) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let start = (page.offset() as usize).min(items.len());
    let end = (start + page.limit as usize).min(items.len());
    (items.drain(start..end).collect(), total)
}

impl RepositoryProvider for InMemoryStorage {
    fn customers(&self) -> &dyn CustomerRepository {
        self
    }

    fn service_items(&self) -> &dyn ServiceItemRepository {
        self
    }

    fn orders(&self) -> &dyn OrderRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStorage {
    async fn create(&self, draft: CustomerDraft) -> DomainResult<Customer> {
        let now = Utc::now();
        let id = self.customer_counter.fetch_add(1, Ordering::SeqCst);
        let customer = Customer {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            created_at: now,
            updated_at: now,
        };
        self.customers.insert(id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i32, draft: CustomerDraft) -> DomainResult<Customer> {
        let mut entry = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| DomainError::customer_not_found(id))?;
        entry.apply(draft);
        Ok(entry.clone())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|c| c.clone()))
    }

    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Customer>> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let mut matches: Vec<Customer> = self
            .customers
            .iter()
            .filter(|c| {
                needle
                    .as_deref()
                    .map_or(true, |n| c.name.to_lowercase().contains(n))
            })
            .map(|c| c.value().clone())
            .collect();
        matches.sort_by_key(|c| c.id);

        let (items, total) = paginate(matches, page);
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.customers.len() as u64)
    }
}

#[async_trait]
impl ServiceItemRepository for InMemoryStorage {
    async fn create(&self, draft: ServiceItemDraft) -> DomainResult<ServiceItem> {
        let id = self.service_item_counter.fetch_add(1, Ordering::SeqCst);
        let item = ServiceItem {
            id,
            name: draft.name,
            category: draft.category,
            price_per_unit: draft.price_per_unit,
            unit_type: draft.unit_type,
        };
        self.service_items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i32, draft: ServiceItemDraft) -> DomainResult<ServiceItem> {
        let mut entry = self
            .service_items
            .get_mut(&id)
            .ok_or_else(|| DomainError::service_item_not_found(id))?;
        entry.name = draft.name;
        entry.category = draft.category;
        entry.price_per_unit = draft.price_per_unit;
        entry.unit_type = draft.unit_type;
        Ok(entry.clone())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceItem>> {
        Ok(self.service_items.get(&id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ServiceItem>> {
        let mut items: Vec<ServiceItem> =
            self.service_items.iter().map(|s| s.value().clone()).collect();
        items.sort_by_key(|s| s.id);
        Ok(items)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.service_items.len() as u64)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStorage {
    async fn create(&self, draft: OrderDraft) -> DomainResult<Order> {
        // Check every reference before writing anything.
        if !self.customers.contains_key(&draft.customer_id) {
            return Err(DomainError::customer_not_found(draft.customer_id));
        }
        if let Some(missing) = draft
            .lines
            .iter()
            .find(|l| !self.service_items.contains_key(&l.service_item_id))
        {
            return Err(DomainError::service_item_not_found(missing.service_item_id));
        }

        let total_amount = draft.total_amount()?;
        let now = Utc::now();
        let id = self.order_counter.fetch_add(1, Ordering::SeqCst);
        let row = OrderRow {
            id,
            customer_id: draft.customer_id,
            status: draft.status(),
            total_amount,
            pickup_date: draft.pickup_date,
            delivery_date: draft.delivery_date,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
            seq: self.order_seq.fetch_add(1, Ordering::SeqCst),
        };

        let items = draft
            .lines
            .into_iter()
            .map(|line| OrderItemRow {
                id: self.order_item_counter.fetch_add(1, Ordering::SeqCst),
                service_item_id: line.service_item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
                notes: line.notes,
            })
            .collect();

        self.order_items.insert(id, items);
        match self.assemble(&row) {
            Ok(order) => {
                self.orders.insert(id, row);
                Ok(order)
            }
            Err(e) => {
                self.order_items.remove(&id);
                Err(e)
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Order>> {
        let row = self.orders.get(&id).map(|r| r.clone());
        row.map(|r| self.assemble(&r)).transpose()
    }

    async fn list(
        &self,
        filter: OrderFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Order>> {
        let mut rows = self.matching_rows(filter);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.seq.cmp(&a.seq)));

        let (rows, total) = paginate(rows, page);
        let items = rows
            .iter()
            .map(|r| self.assemble(r))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut row = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| DomainError::order_not_found(id))?;
        row.status = status;
        row.updated_at = updated_at;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.orders.len() as u64)
    }

    async fn count_by_status(&self, status: OrderStatus) -> DomainResult<u64> {
        Ok(self.orders.iter().filter(|r| r.status == status).count() as u64)
    }

    async fn sum_total_by_status(&self, status: OrderStatus) -> DomainResult<Decimal> {
        order_total(
            self.orders
                .iter()
                .filter(|r| r.status == status)
                .map(|r| r.total_amount),
        )
    }
}

#[async_trait]
impl UserRepository for InMemoryStorage {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        if self.users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict(format!(
                "Email already registered: {}",
                new_user.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: new_user.full_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let mut user = self.users.get_mut(id).ok_or_else(|| DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        })?;
        let now = Utc::now();
        user.last_login_at = Some(now);
        user.updated_at = now;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricedLine, ServiceCategory};
    use std::str::FromStr;

    #[tokio::test]
    async fn create_with_missing_item_stores_nothing() {
        let storage = InMemoryStorage::new();
        let customer = CustomerRepository::create(
            &storage,
            CustomerDraft {
                name: "Funke Adeyemi".into(),
                phone: "+2349011223344".into(),
                email: None,
                address: None,
            },
        )
        .await
        .unwrap();
        let wash = ServiceItemRepository::create(
            &storage,
            ServiceItemDraft {
                name: "Wash & Fold".into(),
                category: ServiceCategory::Wash,
                price_per_unit: Decimal::from_str("1500.00").unwrap(),
                unit_type: "KG".into(),
            },
        )
        .await
        .unwrap();

        let mut lines = vec![PricedLine::price(&wash, 2, None).unwrap()];
        lines.push(PricedLine {
            service_item_id: 77,
            quantity: 1,
            unit_price: Decimal::ONE,
            subtotal: Decimal::ONE,
            notes: None,
        });
        let err = OrderRepository::create(
            &storage,
            OrderDraft {
                customer_id: customer.id,
                pickup_date: None,
                delivery_date: None,
                notes: None,
                lines,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "ServiceItem", .. }));
        assert_eq!(OrderRepository::count(&storage).await.unwrap(), 0);
        assert!(storage.order_items.is_empty());
    }

    #[tokio::test]
    async fn customers_paginate_in_id_order() {
        let storage = InMemoryStorage::new();
        for name in ["A", "B", "C"] {
            CustomerRepository::create(
                &storage,
                CustomerDraft {
                    name: name.into(),
                    phone: "1".into(),
                    email: None,
                    address: None,
                },
            )
            .await
            .unwrap();
        }
        let page = storage
            .customers()
            .list(None, PaginationParams::new(Some(2), Some(2)))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "C");
    }
}
