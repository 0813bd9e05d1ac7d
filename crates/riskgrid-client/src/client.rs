//! HTTP client for the konteks risk-matrix endpoints.

use crate::error::Error;
use crate::session::Session;
use crate::types::{BulkCreateRequest, BulkCreateResponse, BulkCreateResult, ListMatricesResponse};
use riskgrid_core::{
    delete_plan, BandConfig, CellAssignment, DeleteOutcome, DeleteReport, MatrixRecord, RecordId,
};
use tracing::{debug, warn};

/// Page size used when following pagination to completion.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Client for one konteks backend.
///
/// Carries the session's bearer token in a default header; one instance is
/// shared per backend, the risk-context id is passed per call.
#[derive(Debug, Clone)]
pub struct KonteksClient {
    base_url: String,
    client: reqwest::Client,
}

impl KonteksClient {
    /// Build a client for the given base URL with an injected session.
    pub fn new(base_url: impl Into<String>, session: &Session) -> Result<Self, Error> {
        use reqwest::header::{HeaderMap, AUTHORIZATION};

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, session.authorization()?);

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Fetch one page of persisted matrix records.
    ///
    /// `GET /konteks/:id/risk-matrices?page&limit`
    pub async fn list_matrices(
        &self,
        konteks_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ListMatricesResponse, Error> {
        let url = format!("{}/konteks/{}/risk-matrices", self.base_url, konteks_id);
        debug!(konteks_id, page, limit, "listing risk matrices");

        let resp = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Fetch every persisted record for a risk-context, following
    /// pagination to the last page.
    pub async fn fetch_all_records(&self, konteks_id: u64) -> Result<Vec<MatrixRecord>, Error> {
        let first = self.list_matrices(konteks_id, 1, DEFAULT_PAGE_LIMIT).await?;
        let total_pages = first.pagination.total_pages;
        let mut records = first.data;

        for page in 2..=total_pages {
            let next = self
                .list_matrices(konteks_id, page, DEFAULT_PAGE_LIMIT)
                .await?;
            records.extend(next.data);
        }

        debug!(konteks_id, count = records.len(), "fetched matrix records");
        Ok(records)
    }

    /// Create a full grid in one request.
    ///
    /// `POST /konteks/:id/risk-matrices/bulk`. The backend rejects bulk
    /// creation onto a non-empty matrix; callers wanting the precondition
    /// checked client-side use [`create_from_bands`](Self::create_from_bands).
    pub async fn bulk_create(
        &self,
        konteks_id: u64,
        assignments: Vec<CellAssignment>,
    ) -> Result<BulkCreateResult, Error> {
        let url = format!(
            "{}/konteks/{}/risk-matrices/bulk",
            self.base_url, konteks_id
        );
        debug!(konteks_id, cells = assignments.len(), "bulk-creating matrix");

        let body = BulkCreateRequest {
            matrices: assignments,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        let resp = check(resp).await?;
        let envelope: BulkCreateResponse = resp.json().await?;

        if !envelope.data.is_complete {
            warn!(
                konteks_id,
                created = envelope.data.created_count,
                expected = envelope.data.expected_total,
                "bulk create left the matrix incomplete"
            );
        }
        Ok(envelope.data)
    }

    /// The one-shot "create from configuration" action.
    ///
    /// Verifies the matrix is currently empty (the action's precondition),
    /// derives all N² assignments from the validated banding, and submits
    /// them in one bulk create.
    pub async fn create_from_bands(
        &self,
        konteks_id: u64,
        config: &BandConfig,
    ) -> Result<BulkCreateResult, Error> {
        let existing = self.fetch_all_records(konteks_id).await?;
        if !existing.is_empty() {
            return Err(Error::MatrixNotEmpty(konteks_id));
        }

        let assignments = config
            .assignments()
            .into_iter()
            .map(|(cell, level)| CellAssignment {
                likelihood_level: cell.likelihood,
                impact_level: cell.impact,
                risk_level: level,
            })
            .collect();
        self.bulk_create(konteks_id, assignments).await
    }

    /// Delete one persisted cell record.
    ///
    /// `DELETE /konteks/:id/risk-matrices/:matrixId`
    pub async fn delete_record(&self, konteks_id: u64, record: RecordId) -> Result<(), Error> {
        let url = format!(
            "{}/konteks/{}/risk-matrices/{}",
            self.base_url, konteks_id, record.0
        );
        let resp = self.client.delete(&url).send().await?;
        check(resp).await?;
        Ok(())
    }

    /// Clear the whole matrix: delete every record concurrently.
    ///
    /// All deletes fire at once; there is no ordering between them, only a
    /// completion barrier. The aggregate outcome decides the follow-up:
    /// `Cleared` means local state may be dropped, `Indeterminate` means
    /// the caller must re-fetch authoritative state (never assume a subset
    /// succeeded), `Failed` means nothing changed and the whole operation
    /// is retryable. The failed subset is not retried here.
    pub async fn clear_matrix(
        &self,
        konteks_id: u64,
        records: &[MatrixRecord],
    ) -> Result<DeleteOutcome, Error> {
        let plan = delete_plan(records);
        let mut report = DeleteReport::new(plan.len());
        debug!(konteks_id, total = plan.len(), "clearing matrix");

        let deletes = plan
            .iter()
            .map(|record| self.delete_record(konteks_id, *record));
        let results = futures::future::join_all(deletes).await;

        for (record, result) in plan.iter().zip(results) {
            if let Err(err) = result {
                warn!(konteks_id, record = record.0, %err, "delete failed");
                report.record_failure();
            }
        }

        let outcome = report.outcome();
        if let DeleteOutcome::Indeterminate { succeeded, failed } = outcome {
            warn!(
                konteks_id,
                succeeded, failed, "partial clear; authoritative re-fetch required"
            );
        }
        Ok(outcome)
    }
}

/// Promote non-success statuses to errors, 401 first.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Auth);
    }
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}
