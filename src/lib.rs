//! # FreshPress
//!
//! Order management backend for a laundry / dry-cleaning shop: customers,
//! a priced service catalog, and orders moving from pickup to delivery.
//!
//! ## Architecture
//!
//! - **domain**: entities, pricing rules, status vocabulary and repository traits
//! - **application**: use cases (orders, catalog, customers, dashboard, identity)
//! - **infrastructure**: SeaORM persistence, in-memory storage, crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

pub use interfaces::http::create_api_router;
