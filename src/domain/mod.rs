//! Domain layer
//!
//! Aggregates, the pricing engine and repository interfaces. Nothing in here
//! knows about HTTP or SQL.

pub mod catalog;
pub mod customer;
pub mod order;
pub mod pricing;
pub mod repositories;
pub mod user;

pub use catalog::{ServiceCategory, ServiceItem, ServiceItemDraft, ServiceItemRepository};
pub use customer::{Customer, CustomerDraft, CustomerRepository};
pub use order::{
    Order, OrderDraft, OrderFilter, OrderItem, OrderParts, OrderRepository, OrderStatus,
    PricedLine, TransitionPolicy,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{NewUser, User, UserRepository, UserRole};

pub use crate::shared::errors::DomainError;
