//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::catalog::ServiceItemRepository;
use super::customer::CustomerRepository;
use super::order::OrderRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let customer = repos.customers().find_by_id(1).await?;
///     let pending = repos.orders().count_by_status(OrderStatus::Pending).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn service_items(&self) -> &dyn ServiceItemRepository;
    fn orders(&self) -> &dyn OrderRepository;
    fn users(&self) -> &dyn UserRepository;
}
