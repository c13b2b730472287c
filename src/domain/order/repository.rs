//! Order repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::{Order, OrderDraft, OrderFilter};
use super::status::OrderStatus;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores the order and all of its lines atomically and returns the
    /// materialized order with ids and timestamps assigned.
    async fn create(&self, draft: OrderDraft) -> DomainResult<Order>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Order>>;

    /// Newest first (creation time descending, then id descending).
    async fn list(
        &self,
        filter: OrderFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Order>>;

    /// `NotFound` when the order does not exist.
    async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
    async fn count_by_status(&self, status: OrderStatus) -> DomainResult<u64>;
    /// Sum of order totals in `status`, zero when there are none.
    async fn sum_total_by_status(&self, status: OrderStatus) -> DomainResult<Decimal>;
}
