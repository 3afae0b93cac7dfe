//! Route definitions for the `/activities` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch};
use axum::Router;
use inci_core::uploads::{MAX_FILES_PER_UPLOAD, MAX_FILE_SIZE_BYTES};

use crate::handlers::{activities, files};
use crate::state::AppState;

/// Body limit for the upload route: a full batch plus multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_FILES_PER_UPLOAD * MAX_FILE_SIZE_BYTES + 64 * 1024;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET    /pending                       -> list_pending  (?teacherName=&schoolName=)
/// PATCH  /{id}/status                   -> update_status
/// GET    /{id}/files                    -> list_files
/// POST   /{id}/files                    -> upload_files  (multipart, field "files")
/// GET    /files/{file_id}/download      -> download_file
/// DELETE /files/{file_id}               -> delete_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(activities::list_pending))
        .route("/{id}/status", patch(activities::update_status))
        .route(
            "/{id}/files",
            get(files::list_files)
                .post(files::upload_files)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/files/{file_id}/download", get(files::download_file))
        .route("/files/{file_id}", delete(files::delete_file))
}
