//! Service catalog DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ServiceCategory, ServiceItem, ServiceItemDraft};
use crate::interfaces::http::common::money;
use crate::shared::validations::{money_amount, not_blank};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemDto {
    pub id: i32,
    pub name: String,
    pub category: ServiceCategory,
    #[schema(example = "1500.00")]
    pub price_per_unit: String,
    #[schema(example = "KG")]
    pub unit_type: String,
}

impl From<ServiceItem> for ServiceItemDto {
    fn from(item: ServiceItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            price_per_unit: money(item.price_per_unit),
            unit_type: item.unit_type,
        }
    }
}

/// Body for both create and full update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemRequest {
    #[validate(
        length(max = 100, message = "name must be at most 100 characters"),
        custom(function = "not_blank", message = "name is required")
    )]
    pub name: String,
    pub category: ServiceCategory,
    /// Accepts a JSON number or a decimal string
    #[schema(value_type = String, example = "1500.00")]
    #[validate(custom(
        function = "money_amount",
        message = "price must be non-negative with at most 2 decimal places"
    ))]
    pub price_per_unit: Decimal,
    #[validate(
        length(max = 20, message = "unit type must be at most 20 characters"),
        custom(function = "not_blank", message = "unit type is required")
    )]
    pub unit_type: String,
}

impl From<ServiceItemRequest> for ServiceItemDraft {
    fn from(req: ServiceItemRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            price_per_unit: req.price_per_unit,
            unit_type: req.unit_type,
        }
    }
}
