//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{CustomerRepository, OrderRepository, ServiceItemRepository, UserRepository};

use super::customer_repository::SeaOrmCustomerRepository;
use super::order_repository::SeaOrmOrderRepository;
use super::service_item_repository::SeaOrmServiceItemRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let customer = repos.customers().find_by_id(1).await?;
/// let order = repos.orders().find_by_id(42).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    customers: SeaOrmCustomerRepository,
    service_items: SeaOrmServiceItemRepository,
    orders: SeaOrmOrderRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: SeaOrmCustomerRepository::new(db.clone()),
            service_items: SeaOrmServiceItemRepository::new(db.clone()),
            orders: SeaOrmOrderRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn service_items(&self) -> &dyn ServiceItemRepository {
        &self.service_items
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
