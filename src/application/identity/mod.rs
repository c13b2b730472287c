//! Identity module — staff accounts & authentication
//!
//! Contains the `UserService` which covers login, registration and the
//! default admin account.

pub mod service;

pub use service::{AuthResult, UserService};
