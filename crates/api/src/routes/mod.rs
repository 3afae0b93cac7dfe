pub mod activities;
pub mod auth;
pub mod headoffice;
pub mod health;
pub mod profile;
pub mod reports;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                      service health
///
/// /auth/login                                  student / teacher login
/// /auth/register                               student / teacher registration
///
/// /students                                    list, create
/// /students/{id}                               student + summary + badge
/// /students/{id}/activities                    list, log activity
///
/// /profile/{id}                                get, update
/// /profile/{id}/change-password                change password (POST)
/// /profile/{id}/activities                     activity history
/// /profile/{id}/badges                         badge panel
/// /profile/{id}/report                         volunteering report
///
/// /activities/pending                          review queue
/// /activities/{id}/status                      approve / reject (PATCH)
/// /activities/{id}/files                       list, upload
/// /activities/files/{file_id}                  delete
/// /activities/files/{file_id}/download         download
///
/// /reports/overview                            overall statistics
/// /reports/by-city                             per-city statistics
/// /reports/by-activity-type                    per-type statistics
/// /reports/monthly                             per-month statistics
/// /reports/schools                             per-school rollup
/// /reports/top-students                        student ranking
/// /reports/top-schools                         school ranking
/// /reports/student-report/{id}                 volunteering report
///
/// /headoffice/register                         create admin
/// /headoffice/login                            admin login
/// /headoffice/admins                           list admins
/// /headoffice/students                         list students
/// /headoffice/activities                       enriched activity list
/// /headoffice/activities/{id}/status           approve / reject (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/students", students::router())
        .nest("/profile", profile::router())
        .nest("/activities", activities::router())
        .nest("/reports", reports::router())
        .nest("/headoffice", headoffice::router())
}
