//! Route definitions for the `/headoffice` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{activities, headoffice};
use crate::state::AppState;

/// Routes mounted at `/headoffice`.
///
/// ```text
/// POST   /register                   -> register
/// POST   /login                      -> login
/// GET    /admins                     -> list_admins
/// GET    /students                   -> list_students
/// GET    /activities                 -> list_activities
/// PATCH  /activities/{id}/status     -> activities::update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(headoffice::register))
        .route("/login", post(headoffice::login))
        .route("/admins", get(headoffice::list_admins))
        .route("/students", get(headoffice::list_students))
        .route("/activities", get(headoffice::list_activities))
        .route("/activities/{id}/status", patch(activities::update_status))
}
