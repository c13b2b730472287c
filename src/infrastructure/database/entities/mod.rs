//! Database entities module

pub mod customer;
pub mod order;
pub mod order_item;
pub mod service_item;
pub mod user;

pub use customer::Entity as Customer;
pub use order::Entity as Order;
pub use order_item::Entity as OrderItem;
pub use service_item::Entity as ServiceItem;
pub use user::Entity as User;
