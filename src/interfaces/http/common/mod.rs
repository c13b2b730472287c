//! Shared HTTP building blocks: response envelope, error mapping and the
//! validating JSON extractor

pub mod error;
pub mod money;
pub mod response;
pub mod validated_json;

pub use error::*;
pub use money::money;
pub use response::*;
pub use validated_json::*;
