//! Orders module — create, list, fetch and move orders through their lifecycle

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
