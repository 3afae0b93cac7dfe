//! Handlers for activity review (`/activities/pending`, `/activities/{id}/status`).

use axum::extract::{Path, Query, State};
use axum::Json;
use inci_core::activity::ActivityRecord;
use inci_core::review::ReviewItem;
use inci_core::service;
use inci_core::types::DbId;
use inci_core::validation::parse_status;
use serde::Deserialize;

use crate::error::AppResult;
use crate::query::PendingParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the status endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    /// Reviewer note shown to the student.
    pub note: Option<String>,
}

/// GET /api/activities/pending
///
/// Pending activities with student name, school, coordinator teacher and
/// evidence files. `teacherName` / `schoolName` narrow the queue by
/// case-insensitive substring.
pub async fn list_pending(
    State(state): State<AppState>,
    Query(params): Query<PendingParams>,
) -> AppResult<Json<DataResponse<Vec<ReviewItem>>>> {
    let filter = params.into();
    let queue = service::pending_review_queue(state.store(), &filter).await?;
    tracing::debug!(count = queue.len(), "Pending review queue loaded");
    Ok(Json(DataResponse { data: queue }))
}

/// PATCH /api/activities/{id}/status
///
/// Approve or reject an activity. Re-deciding an earlier decision is allowed.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<ActivityRecord>>> {
    let status = parse_status(input.status.as_deref())?;
    let note = input.note.filter(|n| !n.trim().is_empty());
    let activity = service::review_activity(state.store(), id, status, note).await?;
    Ok(Json(DataResponse { data: activity }))
}
