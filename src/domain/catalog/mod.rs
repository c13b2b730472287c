//! Service catalog aggregate
//!
//! Priced units of work offered by the shop.

pub mod model;
pub mod repository;

pub use model::{ServiceCategory, ServiceItem, ServiceItemDraft};
pub use repository::ServiceItemRepository;
