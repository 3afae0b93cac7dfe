//! Handlers for activity evidence files (upload, list, download, delete).

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Json;
use inci_core::activity::{ActivityFile, NewActivityFile};
use inci_core::types::DbId;
use inci_core::uploads::{validate_file_size, validate_mime_type, MAX_FILES_PER_UPLOAD};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Multipart field name carrying the uploaded files.
pub const UPLOAD_FIELD: &str = "files";

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub files: Vec<ActivityFile>,
}

/// An upload read fully into memory and validated, not yet written.
struct PendingUpload {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

async fn require_activity(state: &AppState, id: DbId) -> AppResult<()> {
    match state.store().get_activity(id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("activity", id)),
    }
}

async fn require_file(state: &AppState, file_id: DbId) -> AppResult<ActivityFile> {
    state
        .store()
        .get_activity_file(file_id)
        .await?
        .ok_or_else(|| AppError::not_found("file", file_id))
}

/// Read every `files` field, validating type, size and count before any
/// file is written.
async fn read_uploads(mut multipart: Multipart) -> AppResult<Vec<PendingUpload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if uploads.len() == MAX_FILES_PER_UPLOAD {
            return Err(AppError::BadRequest(format!(
                "At most {MAX_FILES_PER_UPLOAD} files can be uploaded at once"
            )));
        }

        let file_name = field.file_name().unwrap_or("file").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        validate_mime_type(&content_type)?;

        let data = field.bytes().await?;
        validate_file_size(data.len())?;

        uploads.push(PendingUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    if uploads.is_empty() {
        return Err(AppError::BadRequest("No files were uploaded".into()));
    }
    Ok(uploads)
}

/// Write each upload to disk and record it against the activity.
///
/// A file whose record insert fails is removed again, so no stored bytes
/// are left without a record.
async fn store_uploads(
    state: &AppState,
    activity_id: DbId,
    uploads: Vec<PendingUpload>,
) -> AppResult<Vec<ActivityFile>> {
    let mut saved = Vec::with_capacity(uploads.len());

    for upload in uploads {
        let stored_name = state
            .uploads
            .save(&upload.file_name, &upload.data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let record = state
            .store()
            .create_activity_file(
                activity_id,
                NewActivityFile {
                    file_name: upload.file_name,
                    file_path: stored_name.clone(),
                    file_type: upload.content_type,
                    file_size: i64::try_from(upload.data.len()).unwrap_or(i64::MAX),
                },
            )
            .await;
        match record {
            Ok(file) => saved.push(file),
            Err(e) => {
                if let Err(io) = state.uploads.remove(&stored_name).await {
                    tracing::warn!(stored = %stored_name, error = %io, "Failed to discard upload");
                }
                return Err(e.into());
            }
        }
    }
    Ok(saved)
}

/// POST /api/activities/{id}/files
///
/// Multipart upload of up to five evidence files (field `files`), each at
/// most 10 MiB, JPEG/PNG/GIF/PDF/DOC/DOCX only.
pub async fn upload_files(
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResponse>>)> {
    require_activity(&state, activity_id).await?;
    let uploads = read_uploads(multipart).await?;

    let saved = store_uploads(&state, activity_id, uploads).await?;

    tracing::info!(activity_id = %activity_id, count = saved.len(), "Evidence files uploaded");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                message: format!("{} file(s) uploaded", saved.len()),
                files: saved,
            },
        }),
    ))
}

/// GET /api/activities/{id}/files
pub async fn list_files(
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ActivityFile>>>> {
    require_activity(&state, activity_id).await?;
    let files = state.store().list_activity_files(activity_id).await?;
    Ok(Json(DataResponse { data: files }))
}

/// GET /api/activities/files/{file_id}/download
///
/// Streams the stored bytes back under the original file name.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<DbId>,
) -> AppResult<Response> {
    let file = require_file(&state, file_id).await?;

    let data = match state.uploads.read(&file.file_path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(file_id = %file_id, path = %file.file_path, "File record without stored bytes");
            return Err(AppError::not_found("file", file_id));
        }
        Err(e) => return Err(AppError::InternalError(format!("Failed to read upload: {e}"))),
    };

    let content_type = HeaderValue::from_str(&file.file_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        ascii_file_name(&file.file_name)
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(data))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// DELETE /api/activities/files/{file_id}
///
/// Removes the stored bytes (if still present) and the file record.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<DbId>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let file = require_file(&state, file_id).await?;

    match state.uploads.remove(&file.file_path).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(file_id = %file_id, "Stored bytes already missing"),
        Err(e) => return Err(AppError::InternalError(format!("Failed to remove upload: {e}"))),
    }
    state.store().delete_activity_file(file_id).await?;

    tracing::info!(file_id = %file_id, activity_id = %file.activity_id, "Evidence file deleted");
    Ok(Json(MessageResponse::new("File deleted")))
}

/// Header-safe rendition of an original file name.
fn ascii_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
