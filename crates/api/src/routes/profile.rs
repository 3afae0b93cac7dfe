//! Route definitions for the `/profile` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET    /{id}                    -> get_profile
/// PATCH  /{id}                    -> update_profile
/// POST   /{id}/change-password    -> change_password
/// GET    /{id}/activities         -> list_profile_activities
/// GET    /{id}/badges             -> get_badges
/// GET    /{id}/report             -> get_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/{id}/change-password", post(profile::change_password))
        .route("/{id}/activities", get(profile::list_profile_activities))
        .route("/{id}/badges", get(profile::get_badges))
        .route("/{id}/report", get(profile::get_report))
}
