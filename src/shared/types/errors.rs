use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid quantity: {0} (must be a positive integer)")]
    InvalidQuantity(i64),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A stored aggregate broke one of its own invariants.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn customer_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Customer",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn service_item_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "ServiceItem",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn order_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Order",
            field: "id",
            value: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_echoes_identifier() {
        let err = DomainError::customer_not_found(999);
        assert_eq!(err.to_string(), "Not found: Customer with id=999");

        let err = DomainError::service_item_not_found(42);
        assert!(err.to_string().contains("ServiceItem"));
        assert!(err.to_string().contains("42"));
    }
}
