//! User aggregate
//!
//! Staff accounts that authenticate against the API.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserRole};
pub use repository::UserRepository;
