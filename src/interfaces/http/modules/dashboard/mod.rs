//! Dashboard module — headline order and revenue figures

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
