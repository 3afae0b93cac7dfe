//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /overview               -> overview
/// GET    /by-city                -> by_city
/// GET    /by-activity-type       -> by_activity_type
/// GET    /monthly                -> monthly       (?year=)
/// GET    /schools                -> schools
/// GET    /top-students           -> top_students  (?limit=)
/// GET    /top-schools            -> top_schools   (?limit=)
/// GET    /student-report/{id}    -> student_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(reports::overview))
        .route("/by-city", get(reports::by_city))
        .route("/by-activity-type", get(reports::by_activity_type))
        .route("/monthly", get(reports::monthly))
        .route("/schools", get(reports::schools))
        .route("/top-students", get(reports::top_students))
        .route("/top-schools", get(reports::top_schools))
        .route("/student-report/{id}", get(reports::student_report))
}
