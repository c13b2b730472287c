//! Order API handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use super::dto::{CreateOrderRequest, OrderDto, OrderListQuery, UpdateStatusRequest};
use crate::application::OrderService;
use crate::domain::{OrderFilter, OrderStatus};
use crate::interfaces::http::common::{
    domain_error, reference_error, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::shared::PaginationParams;

#[derive(Clone)]
pub struct OrderState {
    pub orders: Arc<OrderService>,
    pub default_page_size: u32,
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<PaginatedResponse<OrderDto>>),
        (status = 400, description = "Unknown status token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    State(state): State<OrderState>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<PaginatedResponse<OrderDto>> {
    let status = query
        .status
        .as_deref()
        .map(OrderStatus::from_str)
        .transpose()
        .map_err(domain_error)?;

    let filter = OrderFilter {
        status,
        customer_id: query.customer_id,
    };
    let page = PaginationParams::new(
        query.page,
        Some(query.size.unwrap_or(state.default_page_size)),
    );

    let result = state
        .orders
        .list_orders(filter, page)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        OrderDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order(State(state): State<OrderState>, Path(id): Path<i32>) -> ApiResult<OrderDto> {
    state
        .orders
        .get_order(id)
        .await
        .map(|order| Json(ApiResponse::success(order.into())))
        .map_err(domain_error)
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created in PENDING", body = ApiResponse<OrderDto>),
        (status = 400, description = "Invalid body, unknown customer or unknown service item")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_order(
    State(state): State<OrderState>,
    ValidatedJson(body): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<OrderDto> {
    let order = state
        .orders
        .create_order(body.into())
        .await
        .map_err(reference_error)?;
    info!(order_id = order.id, total = %order.total_amount(), "Order created via API");
    Ok(Json(ApiResponse::success(order.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/orders/{id}/status",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<OrderDto>),
        (status = 400, description = "Unknown status token or transition rejected"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_order_status(
    State(state): State<OrderState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<OrderDto> {
    let status = OrderStatus::from_str(&body.status).map_err(domain_error)?;
    state
        .orders
        .update_status(id, status)
        .await
        .map(|order| Json(ApiResponse::success(order.into())))
        .map_err(domain_error)
}
