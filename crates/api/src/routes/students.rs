//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                   -> list_students
/// POST   /                   -> create_student
/// GET    /{id}               -> get_student
/// GET    /{id}/activities    -> list_student_activities
/// POST   /{id}/activities    -> log_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(students::list_students).post(students::create_student),
        )
        .route("/{id}", get(students::get_student))
        .route(
            "/{id}/activities",
            get(students::list_student_activities).post(students::log_activity),
        )
}
