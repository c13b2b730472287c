//! Customer aggregate

pub mod model;
pub mod repository;

pub use model::{Customer, CustomerDraft};
pub use repository::CustomerRepository;
