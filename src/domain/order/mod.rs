//! Order aggregate
//!
//! Orders, their priced lines, the status vocabulary and the transition
//! policies applied to it.

pub mod model;
pub mod repository;
pub mod status;

pub use model::{Order, OrderDraft, OrderFilter, OrderItem, OrderParts, PricedLine, NOTES_MAX_LEN};
pub use repository::OrderRepository;
pub use status::{OrderStatus, TransitionPolicy};
