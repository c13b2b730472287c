//! Service catalog repository interface

use async_trait::async_trait;

use super::model::{ServiceItem, ServiceItemDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceItemRepository: Send + Sync {
    async fn create(&self, draft: ServiceItemDraft) -> DomainResult<ServiceItem>;
    /// `NotFound` when absent. Existing order lines keep their snapshot price.
    async fn update(&self, id: i32, draft: ServiceItemDraft) -> DomainResult<ServiceItem>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceItem>>;
    /// All items ordered by id.
    async fn find_all(&self) -> DomainResult<Vec<ServiceItem>>;
    async fn count(&self) -> DomainResult<u64>;
}
