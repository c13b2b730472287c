use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::DashboardStatsDto;
use crate::application::DashboardService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct DashboardState {
    pub dashboard: Arc<DashboardService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Order counts and delivered revenue", body = ApiResponse<DashboardStatsDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard_stats(
    State(state): State<DashboardState>,
) -> ApiResult<DashboardStatsDto> {
    state
        .dashboard
        .compute_stats()
        .await
        .map(|stats| Json(ApiResponse::success(stats.into())))
        .map_err(domain_error)
}
