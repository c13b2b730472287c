//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Customer, CustomerDraft};
use crate::shared::validations::not_blank;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            email: c.email,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Body for both create and full update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(
        length(max = 100, message = "name must be at most 100 characters"),
        custom(function = "not_blank", message = "name is required")
    )]
    pub name: String,
    #[validate(
        length(max = 20, message = "phone must be at most 20 characters"),
        custom(function = "not_blank", message = "phone is required")
    )]
    pub phone: String,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,
}

impl From<CustomerRequest> for CustomerDraft {
    fn from(req: CustomerRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            email: req.email.filter(|e| !e.trim().is_empty()),
            address: req.address,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// Case-insensitive substring of the customer name
    pub search: Option<String>,
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Page size (1–100)
    #[serde(alias = "limit")]
    pub size: Option<u32>,
}
