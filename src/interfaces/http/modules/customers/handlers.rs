//! Customer API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{CustomerDto, CustomerListQuery, CustomerRequest};
use crate::application::CustomerService;
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ApiResult, PageQuery, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::modules::orders::OrderDto;
use crate::shared::PaginationParams;

#[derive(Clone)]
pub struct CustomerState {
    pub customers: Arc<CustomerService>,
    pub default_page_size: u32,
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    params(CustomerListQuery),
    responses(
        (status = 200, description = "Customers ordered by id", body = ApiResponse<PaginatedResponse<CustomerDto>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    State(state): State<CustomerState>,
    Query(query): Query<CustomerListQuery>,
) -> ApiResult<PaginatedResponse<CustomerDto>> {
    let page = PaginationParams::new(
        query.page,
        Some(query.size.unwrap_or(state.default_page_size)),
    );
    let search = query.search.filter(|s| !s.trim().is_empty());

    let result = state
        .customers
        .list(search, page)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        CustomerDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    State(state): State<CustomerState>,
    Path(id): Path<i32>,
) -> ApiResult<CustomerDto> {
    state
        .customers
        .get(id)
        .await
        .map(|c| Json(ApiResponse::success(c.into())))
        .map_err(domain_error)
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer created", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_customer(
    State(state): State<CustomerState>,
    ValidatedJson(body): ValidatedJson<CustomerRequest>,
) -> ApiResult<CustomerDto> {
    state
        .customers
        .create(body.into())
        .await
        .map(|c| Json(ApiResponse::success(c.into())))
        .map_err(domain_error)
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_customer(
    State(state): State<CustomerState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<CustomerRequest>,
) -> ApiResult<CustomerDto> {
    state
        .customers
        .update(id, body.into())
        .await
        .map(|c| Json(ApiResponse::success(c.into())))
        .map_err(domain_error)
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/orders",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID"), PageQuery),
    responses(
        (status = 200, description = "The customer's orders, newest first", body = ApiResponse<PaginatedResponse<OrderDto>>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customer_orders(
    State(state): State<CustomerState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> ApiResult<PaginatedResponse<OrderDto>> {
    let result = state
        .customers
        .orders(id, query.params(state.default_page_size))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        OrderDto::from,
    ))))
}
