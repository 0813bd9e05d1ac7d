//! Wire types of the konteks REST API.
//!
//! Field names follow the backend's camelCase JSON. The cell-level types
//! (`MatrixRecord`, `CellAssignment`, `RiskLevel`) live in riskgrid-core
//! and are reused here unchanged.

use riskgrid_core::{CellAssignment, MatrixRecord};
use serde::{Deserialize, Serialize};

/// Pagination envelope of list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// `GET /konteks/:id/risk-matrices` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMatricesResponse {
    pub data: Vec<MatrixRecord>,
    pub pagination: Pagination,
}

/// `POST /konteks/:id/risk-matrices/bulk` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateRequest {
    pub matrices: Vec<CellAssignment>,
}

/// Payload of a bulk-create response.
///
/// `is_complete` is the backend's verdict on whether the konteks now holds
/// its full expected grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateResult {
    pub created: Vec<MatrixRecord>,
    pub created_count: u32,
    pub total_in_konteks: u32,
    pub expected_total: u32,
    pub is_complete: bool,
}

/// `POST /konteks/:id/risk-matrices/bulk` response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub data: BulkCreateResult,
}
