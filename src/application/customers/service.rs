//! Customer records: thin pass-through to the repository plus field checks.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Customer, CustomerDraft, DomainError, DomainResult, Order, OrderFilter, RepositoryProvider,
};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
}

fn normalize(draft: CustomerDraft) -> DomainResult<CustomerDraft> {
    let name = draft.name.trim().to_string();
    let phone = draft.phone.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::Validation("Customer name is required".into()));
    }
    if phone.is_empty() {
        return Err(DomainError::Validation("Customer phone is required".into()));
    }
    let blank_to_none = |v: Option<String>| {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    };
    Ok(CustomerDraft {
        name,
        phone,
        email: blank_to_none(draft.email),
        address: blank_to_none(draft.address),
    })
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, draft: CustomerDraft) -> DomainResult<Customer> {
        let customer = self.repos.customers().create(normalize(draft)?).await?;
        info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: i32, draft: CustomerDraft) -> DomainResult<Customer> {
        let customer = self.repos.customers().update(id, normalize(draft)?).await?;
        info!(customer_id = id, "Customer updated");
        Ok(customer)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(id))
    }

    pub async fn list(
        &self,
        search: Option<String>,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Customer>> {
        self.repos.customers().list(search, page).await
    }

    /// Orders placed by one customer, newest first.
    pub async fn orders(
        &self,
        id: i32,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Order>> {
        self.get(id).await?;
        self.repos
            .orders()
            .list(
                OrderFilter {
                    status: None,
                    customer_id: Some(id),
                },
                page,
            )
            .await
    }
}
