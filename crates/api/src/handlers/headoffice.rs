//! Handlers for the `/headoffice` resource (head-office administrators).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inci_core::people::{HeadOfficeAdmin, NewHeadOfficeAdmin, Student, ROLE_HEADOFFICE};
use inci_core::review::ReviewItem;
use inci_core::service;
use inci_core::validation::{require_fields, require_non_empty, validate_password_strength};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::auth::{authenticate, AuthenticatedUser};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// POST /api/headoffice/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterAdminRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<HeadOfficeAdmin>>)> {
    require_fields(&[
        ("firstName", input.first_name.as_deref()),
        ("lastName", input.last_name.as_deref()),
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])?;
    validate_password_strength(input.password.as_deref().unwrap_or_default())?;
    let password_hash = hash_password(input.password.as_deref().unwrap_or_default())?;

    let admin = state
        .store()
        .create_admin(NewHeadOfficeAdmin {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            password_hash,
        })
        .await?;

    tracing::info!(admin_id = %admin.id, "Head-office admin registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: admin })))
}

/// POST /api/headoffice/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<AdminLoginRequest>,
) -> AppResult<Json<DataResponse<AuthenticatedUser<HeadOfficeAdmin>>>> {
    require_fields(&[
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])?;
    let email = require_non_empty(input.email.as_deref(), "email")?;
    let password = input.password.as_deref().unwrap_or_default();

    let admin = state.store().find_admin_by_email(email).await?;
    let admin = authenticate(admin, password, |a| Some(a.password_hash.as_str()))?;

    tracing::info!(admin_id = %admin.id, "Head-office admin logged in");
    Ok(Json(DataResponse {
        data: AuthenticatedUser {
            user: admin,
            role: ROLE_HEADOFFICE,
        },
    }))
}

/// GET /api/headoffice/admins
pub async fn list_admins(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<HeadOfficeAdmin>>>> {
    let admins = state.store().list_admins().await?;
    Ok(Json(DataResponse { data: admins }))
}

// ---------------------------------------------------------------------------
// Oversight
// ---------------------------------------------------------------------------

/// GET /api/headoffice/students
pub async fn list_students(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Student>>>> {
    let students = state.store().list_all_students().await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/headoffice/activities
///
/// Every activity with student name, school and files. Activities whose
/// student no longer exists are listed under `Bilinmiyor`.
pub async fn list_activities(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReviewItem>>>> {
    let items = service::enriched_activities(state.store()).await?;
    Ok(Json(DataResponse { data: items }))
}
