use async_trait::async_trait;

use super::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Conflict` when the email is already registered.
    async fn create(&self, user: NewUser) -> DomainResult<User>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn record_login(&self, id: &str) -> DomainResult<()>;
    async fn count(&self) -> DomainResult<u64>;
}
