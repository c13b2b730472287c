//! Service catalog handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{ServiceItemDto, ServiceItemRequest};
use crate::application::CatalogService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "Services",
    responses(
        (status = 200, description = "Full catalog ordered by id", body = ApiResponse<Vec<ServiceItemDto>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_services(State(state): State<CatalogState>) -> ApiResult<Vec<ServiceItemDto>> {
    let items = state.catalog.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(ServiceItemDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "Service item ID")),
    responses(
        (status = 200, description = "Service item", body = ApiResponse<ServiceItemDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_service(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
) -> ApiResult<ServiceItemDto> {
    state
        .catalog
        .get(id)
        .await
        .map(|item| Json(ApiResponse::success(item.into())))
        .map_err(domain_error)
}

#[utoipa::path(
    post,
    path = "/api/v1/services",
    tag = "Services",
    request_body = ServiceItemRequest,
    responses(
        (status = 200, description = "Service item created", body = ApiResponse<ServiceItemDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_service(
    State(state): State<CatalogState>,
    ValidatedJson(body): ValidatedJson<ServiceItemRequest>,
) -> ApiResult<ServiceItemDto> {
    state
        .catalog
        .create(body.into())
        .await
        .map(|item| Json(ApiResponse::success(item.into())))
        .map_err(domain_error)
}

#[utoipa::path(
    put,
    path = "/api/v1/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "Service item ID")),
    request_body = ServiceItemRequest,
    responses(
        (status = 200, description = "Service item updated; existing orders keep their prices", body = ApiResponse<ServiceItemDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_service(
    State(state): State<CatalogState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<ServiceItemRequest>,
) -> ApiResult<ServiceItemDto> {
    state
        .catalog
        .update(id, body.into())
        .await
        .map(|item| Json(ApiResponse::success(item.into())))
        .map_err(domain_error)
}
