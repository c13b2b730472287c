//! Order DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{CreateOrderCommand, OrderLineRequest};
use crate::domain::{Order, OrderItem, OrderStatus};
use crate::interfaces::http::common::money;
use crate::interfaces::http::modules::customers::CustomerDto;
use crate::interfaces::http::modules::services::ServiceItemDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub customer: CustomerDto,
    pub status: OrderStatus,
    /// Sum of item subtotals
    #[schema(example = "4500.00")]
    pub total_amount: String,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        let total_amount = money(order.total_amount());
        let items = order.items().iter().cloned().map(OrderItemDto::from).collect();
        Self {
            id: order.id,
            customer: order.customer.into(),
            status: order.status,
            total_amount,
            pickup_date: order.pickup_date,
            delivery_date: order.delivery_date,
            notes: order.notes,
            items,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: i32,
    /// Current catalog entry; `unitPrice` is what the order was priced at
    pub service_item: ServiceItemDto,
    pub quantity: i32,
    #[schema(example = "1500.00")]
    pub unit_price: String,
    #[schema(example = "3000.00")]
    pub subtotal: String,
    pub notes: Option<String>,
}

impl From<OrderItem> for OrderItemDto {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            service_item: item.service_item.into(),
            quantity: item.quantity,
            unit_price: money(item.unit_price),
            subtotal: money(item.subtotal),
            notes: item.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    pub pickup_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "at least one item is required"), nested)]
    pub items: Vec<OrderLineDto>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub service_item_id: i32,
    #[validate(range(min = 1, message = "quantity must be a positive integer"))]
    pub quantity: i32,
    #[validate(length(max = 255, message = "item notes must be at most 255 characters"))]
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for CreateOrderCommand {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            pickup_date: req.pickup_date,
            delivery_date: req.delivery_date,
            notes: req.notes,
            items: req
                .items
                .into_iter()
                .map(|line| OrderLineRequest {
                    service_item_id: line.service_item_id,
                    quantity: line.quantity,
                    notes: line.notes,
                })
                .collect(),
        }
    }
}

/// `PATCH /orders/{id}/status` body. The token is parsed by hand so unknown
/// values are reported as an invalid status rather than a JSON error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "PROCESSING")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Status token, e.g. `PENDING`
    pub status: Option<String>,
    pub customer_id: Option<i32>,
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Page size (1–100)
    #[serde(alias = "limit")]
    pub size: Option<u32>,
}
