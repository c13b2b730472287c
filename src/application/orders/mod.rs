//! Order lifecycle use-cases

pub mod service;

pub use service::{CreateOrderCommand, OrderLineRequest, OrderService};
