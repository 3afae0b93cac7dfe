//! Handlers for the `/auth` resource (student and teacher login, registration).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inci_core::error::CoreError;
use inci_core::people::{NewStudent, NewTeacher, ROLE_STUDENT, ROLE_TEACHER};
use inci_core::validation::{
    require_fields, require_non_empty, validate_password_strength, validate_role,
};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::auth::{authenticate, AuthenticatedUser};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/register`.
///
/// Student-only fields are ignored when registering a teacher.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub role: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub school_name: Option<String>,
    pub national_id: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub grade: Option<String>,
    pub phone: Option<String>,
    pub coordinator_teacher_name: Option<String>,
    pub target_hours: Option<i32>,
}

/// A logged-in or newly registered account of either role.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Account {
    Student(inci_core::people::Student),
    Teacher(inci_core::people::Teacher),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate a student or teacher with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthenticatedUser<Account>>>> {
    require_fields(&[
        ("role", input.role.as_deref()),
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])?;
    let role = require_non_empty(input.role.as_deref(), "role")?;
    let email = require_non_empty(input.email.as_deref(), "email")?;
    let password = input.password.as_deref().unwrap_or_default();
    validate_role(role)?;

    let data = if role == ROLE_STUDENT {
        let student = state.store().find_student_by_email(email).await?;
        let student = authenticate(student, password, |s| s.password_hash.as_deref())?;
        tracing::info!(student_id = %student.id, "Student logged in");
        AuthenticatedUser {
            user: Account::Student(student),
            role: ROLE_STUDENT,
        }
    } else {
        let teacher = state.store().find_teacher_by_email(email).await?;
        let teacher = authenticate(teacher, password, |t| Some(t.password_hash.as_str()))?;
        tracing::info!(teacher_id = %teacher.id, "Teacher logged in");
        AuthenticatedUser {
            user: Account::Teacher(teacher),
            role: ROLE_TEACHER,
        }
    };

    Ok(Json(DataResponse { data }))
}

/// POST /api/auth/register
///
/// Register a student (`firstName`, `lastName`, `schoolName` required) or a
/// teacher (`firstName`, `lastName` required).
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthenticatedUser<Account>>>)> {
    require_fields(&[
        ("role", input.role.as_deref()),
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])?;
    let role = require_non_empty(input.role.as_deref(), "role")?.to_string();
    validate_role(&role)?;
    validate_password_strength(input.password.as_deref().unwrap_or_default())?;

    let data = if role == ROLE_STUDENT {
        let student = register_student(&state, input).await?;
        tracing::info!(student_id = %student.id, "Student registered");
        AuthenticatedUser {
            user: Account::Student(student),
            role: ROLE_STUDENT,
        }
    } else {
        let teacher = register_teacher(&state, input).await?;
        tracing::info!(teacher_id = %teacher.id, "Teacher registered");
        AuthenticatedUser {
            user: Account::Teacher(teacher),
            role: ROLE_TEACHER,
        }
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

async fn register_student(
    state: &AppState,
    input: RegisterRequest,
) -> Result<inci_core::people::Student, CoreError> {
    require_fields(&[
        ("firstName", input.first_name.as_deref()),
        ("lastName", input.last_name.as_deref()),
        ("schoolName", input.school_name.as_deref()),
    ])?;
    if let Some(target) = input.target_hours {
        inci_core::validation::validate_target_hours(target)?;
    }
    let password_hash = hash_password(input.password.as_deref().unwrap_or_default())?;

    state
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
            password_hash: Some(password_hash),
            coordinator_teacher_name: input.coordinator_teacher_name,
            target_hours: input.target_hours,
        })
        .await
}

async fn register_teacher(
    state: &AppState,
    input: RegisterRequest,
) -> Result<inci_core::people::Teacher, CoreError> {
    require_fields(&[
        ("firstName", input.first_name.as_deref()),
        ("lastName", input.last_name.as_deref()),
    ])?;
    let password_hash = hash_password(input.password.as_deref().unwrap_or_default())?;

    state
        .store()
        .create_teacher(NewTeacher {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            password_hash,
            school_name: input.school_name,
        })
        .await
}
