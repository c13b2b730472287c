pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod request_id;
pub mod services;
