//! Handlers for the `/profile` resource: a student's own page.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use inci_core::activity::ActivityRecord;
use inci_core::badge::{badge_status, BadgeStatus};
use inci_core::error::CoreError;
use inci_core::people::{Student, UpdateStudent};
use inci_core::report::StudentReport;
use inci_core::service::{self, StudentOverview};
use inci_core::types::DbId;
use inci_core::validation::{require_fields, validate_password_strength, validate_target_hours};
use serde::Deserialize;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::students::{list_student_activities, require_student};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `POST /profile/{id}/change-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// GET /api/profile/{id}
///
/// Student, summary, badge, badge panel and goal progress.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudentOverview>>> {
    let overview = service::student_overview(state.store(), id, Utc::now().date_naive())
        .await?
        .ok_or_else(|| AppError::not_found("student", id))?;
    Ok(Json(DataResponse { data: overview }))
}

/// PATCH /api/profile/{id}
///
/// Apply the provided fields; omitted fields keep their value.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateStudent>,
) -> AppResult<Json<DataResponse<Student>>> {
    if let Some(target) = patch.target_hours {
        validate_target_hours(target)?;
    }

    let student = state
        .store()
        .update_student(id, patch)
        .await?
        .ok_or_else(|| AppError::not_found("student", id))?;

    tracing::info!(student_id = %id, "Profile updated");
    Ok(Json(DataResponse { data: student }))
}

/// POST /api/profile/{id}/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    require_fields(&[
        ("currentPassword", input.current_password.as_deref()),
        ("newPassword", input.new_password.as_deref()),
    ])?;
    let current = input.current_password.as_deref().unwrap_or_default();
    let new = input.new_password.as_deref().unwrap_or_default();
    validate_password_strength(new)?;

    let student = require_student(&state, id).await?;
    if !verify_password(current, student.password_hash.as_deref())? {
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }

    let hash = hash_password(new)?;
    if !state.store().set_student_password(id, &hash).await? {
        return Err(AppError::not_found("student", id));
    }

    tracing::info!(student_id = %id, "Password changed");
    Ok(Json(MessageResponse::new("Password changed")))
}

/// GET /api/profile/{id}/activities
pub async fn list_profile_activities(
    state: State<AppState>,
    id: Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ActivityRecord>>>> {
    list_student_activities(state, id).await
}

/// GET /api/profile/{id}/badges
pub async fn get_badges(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BadgeStatus>>> {
    let student = require_student(&state, id).await?;
    let summary =
        service::student_summary(state.store(), student.id, Utc::now().date_naive()).await?;
    Ok(Json(DataResponse {
        data: badge_status(summary.total),
    }))
}

/// GET /api/profile/{id}/report
///
/// Printable volunteering report for university applications.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudentReport>>> {
    let report = service::generate_student_report(state.store(), id, Utc::now())
        .await?
        .ok_or_else(|| AppError::not_found("student", id))?;
    Ok(Json(DataResponse { data: report }))
}
