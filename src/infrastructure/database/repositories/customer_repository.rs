//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::{Customer, CustomerDraft, CustomerRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::customer;
use crate::shared::{PaginatedResult, PaginationParams};

pub(crate) fn customer_to_domain(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        name: m.name,
        phone: m.phone,
        email: m.email,
        address: m.address,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn create(&self, draft: CustomerDraft) -> DomainResult<Customer> {
        let now = Utc::now();
        let model = customer::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            phone: Set(draft.phone),
            email: Set(draft.email),
            address: Set(draft.address),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Customer saved: {} ({})", result.name, result.id);
        Ok(customer_to_domain(result))
    }

    async fn update(&self, id: i32, draft: CustomerDraft) -> DomainResult<Customer> {
        let existing = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::customer_not_found(id));
        };

        let mut active: customer::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.phone = Set(draft.phone);
        active.email = Set(draft.email);
        active.address = Set(draft.address);
        active.updated_at = Set(Utc::now());

        let result = active.update(&self.db).await.map_err(db_err)?;
        info!("Customer updated: {}", id);
        Ok(customer_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(customer_to_domain))
    }

    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Customer>> {
        let mut query = customer::Entity::find();

        if let Some(term) = search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(customer::Column::Name))).like(pattern),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_asc(customer::Column::Id)
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!("Customer list: {} of {} (page {})", models.len(), total, page.page);
        let items = models.into_iter().map(customer_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn count(&self) -> DomainResult<u64> {
        customer::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
