//! Customer repository interface

use async_trait::async_trait;

use super::model::{Customer, CustomerDraft};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, draft: CustomerDraft) -> DomainResult<Customer>;
    /// Full replacement of the writable fields. `NotFound` when absent.
    async fn update(&self, id: i32, draft: CustomerDraft) -> DomainResult<Customer>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;
    /// Case-insensitive "name contains" search, ordered by id.
    async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Customer>>;
    async fn count(&self) -> DomainResult<u64>;
}
