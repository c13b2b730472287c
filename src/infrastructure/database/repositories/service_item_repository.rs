//! SeaORM implementation of ServiceItemRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, ServiceCategory, ServiceItem, ServiceItemDraft,
    ServiceItemRepository,
};
use crate::infrastructure::database::entities::service_item;
use crate::infrastructure::database::money::{from_minor, to_minor};

// ── Conversion helpers ──────────────────────────────────────────

fn category_to_domain(c: service_item::ServiceCategory) -> ServiceCategory {
    match c {
        service_item::ServiceCategory::Wash => ServiceCategory::Wash,
        service_item::ServiceCategory::DryClean => ServiceCategory::DryClean,
        service_item::ServiceCategory::Iron => ServiceCategory::Iron,
        service_item::ServiceCategory::WashAndIron => ServiceCategory::WashAndIron,
        service_item::ServiceCategory::SpecialCare => ServiceCategory::SpecialCare,
    }
}

fn category_to_entity(c: ServiceCategory) -> service_item::ServiceCategory {
    match c {
        ServiceCategory::Wash => service_item::ServiceCategory::Wash,
        ServiceCategory::DryClean => service_item::ServiceCategory::DryClean,
        ServiceCategory::Iron => service_item::ServiceCategory::Iron,
        ServiceCategory::WashAndIron => service_item::ServiceCategory::WashAndIron,
        ServiceCategory::SpecialCare => service_item::ServiceCategory::SpecialCare,
    }
}

pub(crate) fn service_item_to_domain(m: service_item::Model) -> ServiceItem {
    ServiceItem {
        id: m.id,
        name: m.name,
        category: category_to_domain(m.category),
        price_per_unit: from_minor(m.price_per_unit),
        unit_type: m.unit_type,
    }
}

pub struct SeaOrmServiceItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceItemRepository for SeaOrmServiceItemRepository {
    async fn create(&self, draft: ServiceItemDraft) -> DomainResult<ServiceItem> {
        let model = service_item::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            category: Set(category_to_entity(draft.category)),
            price_per_unit: Set(to_minor(draft.price_per_unit)?),
            unit_type: Set(draft.unit_type),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Service item saved: {} ({})", result.name, result.id);
        Ok(service_item_to_domain(result))
    }

    async fn update(&self, id: i32, draft: ServiceItemDraft) -> DomainResult<ServiceItem> {
        let existing = service_item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::service_item_not_found(id));
        };

        let mut active: service_item::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.category = Set(category_to_entity(draft.category));
        active.price_per_unit = Set(to_minor(draft.price_per_unit)?);
        active.unit_type = Set(draft.unit_type);

        let result = active.update(&self.db).await.map_err(db_err)?;
        info!("Service item updated: {}", id);
        Ok(service_item_to_domain(result))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceItem>> {
        let model = service_item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(service_item_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<ServiceItem>> {
        let models = service_item::Entity::find()
            .order_by_asc(service_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(service_item_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        service_item::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_db;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn draft(name: &str, price: &str) -> ServiceItemDraft {
        ServiceItemDraft {
            name: name.into(),
            category: ServiceCategory::DryClean,
            price_per_unit: Decimal::from_str(price).unwrap(),
            unit_type: "PIECE".into(),
        }
    }

    #[tokio::test]
    async fn price_round_trips_exactly() {
        let repo = SeaOrmServiceItemRepository::new(test_db().await);
        let created = repo.create(draft("Dry Cleaning", "3000.00")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.price_per_unit, Decimal::from_str("3000.00").unwrap());
        assert_eq!(found.price_per_unit.to_string(), "3000.00");
        assert_eq!(found.category, ServiceCategory::DryClean);
    }

    #[tokio::test]
    async fn sub_cent_price_is_rejected() {
        let repo = SeaOrmServiceItemRepository::new(test_db().await);
        let err = repo.create(draft("Odd", "1.005")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repo = SeaOrmServiceItemRepository::new(test_db().await);
        repo.create(draft("B", "1.00")).await.unwrap();
        repo.create(draft("A", "2.00")).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn update_changes_price() {
        let repo = SeaOrmServiceItemRepository::new(test_db().await);
        let created = repo.create(draft("Iron Only", "500.00")).await.unwrap();
        let updated = repo
            .update(created.id, draft("Iron Only", "650.50"))
            .await
            .unwrap();
        assert_eq!(updated.price_per_unit.to_string(), "650.50");

        let err = repo.update(999, draft("x", "1")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
