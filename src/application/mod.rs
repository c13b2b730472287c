//! Application layer — use-case orchestration over the domain repositories

pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod identity;
pub mod orders;
pub mod seed;

pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use dashboard::{DashboardService, DashboardStats};
pub use identity::{AuthResult, UserService};
pub use orders::{CreateOrderCommand, OrderLineRequest, OrderService};
pub use seed::seed_demo_data;
