use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::DashboardStats;
use crate::interfaces::http::common::money;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_orders: u64,
    pub total_customers: u64,
    /// Sum of totals over DELIVERED orders
    #[schema(example = "5000.00")]
    pub total_revenue: String,
    pub pending_orders: u64,
    pub processing_orders: u64,
    pub ready_orders: u64,
    pub delivered_orders: u64,
    /// Status token → order count, every status present
    pub status_breakdown: BTreeMap<String, u64>,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_customers: stats.total_customers,
            total_revenue: money(stats.total_revenue),
            pending_orders: stats.pending_orders,
            processing_orders: stats.processing_orders,
            ready_orders: stats.ready_orders,
            delivered_orders: stats.delivered_orders,
            status_breakdown: stats
                .status_breakdown
                .into_iter()
                .map(|(status, count)| (status.as_str().to_string(), count))
                .collect(),
        }
    }
}
