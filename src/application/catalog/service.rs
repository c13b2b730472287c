//! Service catalog management

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, ServiceItem, ServiceItemDraft,
};
use crate::shared::validations::money_amount;

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

fn check(draft: ServiceItemDraft) -> DomainResult<ServiceItemDraft> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::Validation("Service name is required".into()));
    }
    let unit_type = draft.unit_type.trim().to_string();
    if unit_type.is_empty() {
        return Err(DomainError::Validation("Unit type is required".into()));
    }
    money_amount(&draft.price_per_unit).map_err(|_| {
        DomainError::Validation(format!(
            "Price {} must be non-negative with at most two decimals",
            draft.price_per_unit
        ))
    })?;
    Ok(ServiceItemDraft {
        name,
        unit_type,
        ..draft
    })
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<ServiceItem>> {
        self.repos.service_items().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<ServiceItem> {
        self.repos
            .service_items()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::service_item_not_found(id))
    }

    pub async fn create(&self, draft: ServiceItemDraft) -> DomainResult<ServiceItem> {
        let item = self.repos.service_items().create(check(draft)?).await?;
        info!(service_item_id = item.id, name = %item.name, price = %item.price_per_unit, "Service item created");
        Ok(item)
    }

    /// Existing orders keep the price they were created with.
    pub async fn update(&self, id: i32, draft: ServiceItemDraft) -> DomainResult<ServiceItem> {
        let item = self.repos.service_items().update(id, check(draft)?).await?;
        info!(service_item_id = id, price = %item.price_per_unit, "Service item updated");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceCategory;
    use crate::infrastructure::storage::InMemoryStorage;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn draft(price: &str) -> ServiceItemDraft {
        ServiceItemDraft {
            name: "Express Dry Clean".into(),
            category: ServiceCategory::DryClean,
            price_per_unit: Decimal::from_str(price).unwrap(),
            unit_type: "PIECE".into(),
        }
    }

    #[tokio::test]
    async fn invalid_prices_are_rejected() {
        let svc = CatalogService::new(Arc::new(InMemoryStorage::new()));
        assert!(svc.create(draft("-1.00")).await.is_err());
        assert!(svc.create(draft("10.005")).await.is_err());
        assert!(svc.list().await.unwrap().is_empty());

        let created = svc.create(draft("4500.00")).await.unwrap();
        assert_eq!(svc.get(created.id).await.unwrap().name, "Express Dry Clean");
    }

    #[tokio::test]
    async fn get_missing_item_is_not_found() {
        let svc = CatalogService::new(Arc::new(InMemoryStorage::new()));
        assert!(matches!(
            svc.get(3).await,
            Err(DomainError::NotFound { entity: "ServiceItem", .. })
        ));
    }
}
