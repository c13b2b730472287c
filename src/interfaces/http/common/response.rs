//! Response envelope shared by every REST endpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::{PaginatedResult, PaginationParams};

/// Field name → validation messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Standard API envelope
///
/// Success: `{"success": true, "data": {...}}`.
/// Failure: `{"success": false, "error": "...", "details": {"field": ["..."]}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>, details: FieldErrors) -> Self {
        Self {
            details: Some(details),
            ..Self::error(message)
        }
    }
}

/// `?page=&size=` query for list endpoints (1-based page)
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Page size (1–100, default 20)
    #[serde(alias = "limit")]
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn params(&self, default_size: u32) -> PaginationParams {
        PaginationParams::new(self.page, Some(self.size.unwrap_or(default_size)))
    }
}

/// One page of results
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Matching rows across all pages
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<D>(result: PaginatedResult<D>, f: impl FnMut(D) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            size: result.limit,
            total_pages: result.total_pages,
        }
    }
}
