//! Handlers for the `/students` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use inci_core::activity::{coerce_hours, ActivityRecord, NewActivity};
use inci_core::badge::Badge;
use inci_core::error::CoreError;
use inci_core::people::{NewStudent, Student};
use inci_core::service;
use inci_core::summary::Summary;
use inci_core::types::DbId;
use inci_core::validation::{
    parse_activity_date, require_fields, validate_password_strength, validate_target_hours,
};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /students`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub school_name: Option<String>,
    pub national_id: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub grade: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub coordinator_teacher_name: Option<String>,
    pub target_hours: Option<i32>,
}

/// Request body for `POST /students/{id}/activities`.
///
/// `hours` is kept as raw JSON so malformed values can be coerced to zero
/// instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct LogActivityRequest {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub hours: Option<serde_json::Value>,
    pub description: Option<String>,
}

/// Response for `GET /students/{id}`.
#[derive(Debug, Serialize)]
pub struct StudentDetail {
    pub student: Student,
    pub summary: Summary,
    pub badge: Badge,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a student or fail with 404.
pub(crate) async fn require_student(state: &AppState, id: DbId) -> AppResult<Student> {
    state
        .store()
        .get_student(id)
        .await?
        .ok_or_else(|| AppError::not_found("student", id))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Student>>)> {
    require_fields(&[
        ("firstName", input.first_name.as_deref()),
        ("lastName", input.last_name.as_deref()),
        ("schoolName", input.school_name.as_deref()),
    ])?;
    if let Some(target) = input.target_hours {
        validate_target_hours(target)?;
    }
    let password_hash = input
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| validate_password_strength(p).and_then(|()| hash_password(p)))
        .transpose()?;

    let student = state
        .store()
        .create_student(NewStudent {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            national_id: input.national_id,
            school_name: input.school_name,
            city: input.city,
            district: input.district,
            grade: input.grade,
            phone: input.phone,
            email: input.email,
            password_hash,
            coordinator_teacher_name: input.coordinator_teacher_name,
            target_hours: input.target_hours,
        })
        .await?;

    tracing::info!(student_id = %student.id, school = ?student.school_name, "Student created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Student>>>> {
    let students = state.store().list_all_students().await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/students/{id}
///
/// The student with their approved-hour summary and current badge.
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudentDetail>>> {
    let overview = service::student_overview(state.store(), id, Utc::now().date_naive())
        .await?
        .ok_or_else(|| AppError::not_found("student", id))?;

    Ok(Json(DataResponse {
        data: StudentDetail {
            student: overview.student,
            summary: overview.summary,
            badge: overview.badge,
        },
    }))
}

/// POST /api/students/{id}/activities
///
/// Log a volunteering activity. It starts `pending` and only counts toward
/// the student's hours once approved.
pub async fn log_activity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LogActivityRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ActivityRecord>>)> {
    let student = require_student(&state, id).await?;

    require_fields(&[
        ("date", input.date.as_deref()),
        ("type", input.activity_type.as_deref()),
    ])?;
    let hours = input
        .hours
        .as_ref()
        .ok_or_else(|| CoreError::Validation("Missing required fields: hours".into()))?;
    let date = parse_activity_date(input.date.as_deref().unwrap_or_default())?;

    let activity = state
        .store()
        .create_activity(
            student.id,
            NewActivity {
                date,
                activity_type: input.activity_type.unwrap_or_default().trim().to_string(),
                hours: coerce_hours(hours),
                description: input.description.unwrap_or_default(),
            },
        )
        .await?;

    tracing::info!(
        student_id = %student.id,
        activity_id = %activity.id,
        hours = activity.hours,
        "Activity logged",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}

/// GET /api/students/{id}/activities
///
/// All of a student's activities regardless of status, newest first.
pub async fn list_student_activities(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ActivityRecord>>>> {
    let student = require_student(&state, id).await?;
    let mut activities = state.store().list_activities_by_student(student.id).await?;
    activities.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    Ok(Json(DataResponse { data: activities }))
}
