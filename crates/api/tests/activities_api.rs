//! HTTP-level integration tests for activity review and evidence files.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_bytes, body_json, create_student, delete, get, log_activity, patch_json, review, send,
};
use serde_json::json;

const BOUNDARY: &str = "----inci-test-boundary";

/// Build a multipart upload request with one part per `(file name, mime, bytes)`.
fn upload_request(activity_id: &str, parts: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, mime, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(format!("/api/activities/{activity_id}/files"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn student_with_activity(app: &axum::Router) -> (String, String) {
    let student = create_student(app, "Elif", "Ankara Fen Lisesi", "Ankara").await;
    let activity = log_activity(app, &student, "2026-04-05", "Kermes", 4.0).await;
    (student, activity)
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

#[tokio::test]
async fn review_sets_status_and_note() {
    let t = common::build_test_app();
    let (_, activity) = student_with_activity(&t.app).await;

    let response = patch_json(
        t.app,
        &format!("/api/activities/{activity}/status"),
        json!({ "status": "rejected", "note": "Belge eksik" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["reviewNote"], "Belge eksik");
}

#[tokio::test]
async fn decided_activity_can_be_redecided() {
    let t = common::build_test_app();
    let (student, activity) = student_with_activity(&t.app).await;
    review(&t.app, &activity, "rejected").await;
    review(&t.app, &activity, "approved").await;

    let json = body_json(get(t.app, &format!("/api/students/{student}")).await).await;
    assert_eq!(json["data"]["summary"]["total"], 4.0);
}

#[tokio::test]
async fn invalid_status_is_rejected() {
    let t = common::build_test_app();
    let (_, activity) = student_with_activity(&t.app).await;

    let response = patch_json(
        t.app,
        &format!("/api/activities/{activity}/status"),
        json!({ "status": "maybe" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn reviewing_unknown_activity_is_404() {
    let t = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = patch_json(
        t.app,
        &format!("/api/activities/{id}/status"),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pending_queue_lists_undecided_activities_with_student() {
    let t = common::build_test_app();
    let (_, first) = student_with_activity(&t.app).await;
    let (_, second) = student_with_activity(&t.app).await;
    review(&t.app, &first, "approved").await;

    let json = body_json(get(t.app, "/api/activities/pending").await).await;
    let queue = json["data"].as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"], second.as_str());
    assert_eq!(queue[0]["studentName"], "Elif Test");
    assert_eq!(queue[0]["schoolName"], "Ankara Fen Lisesi");
    assert_eq!(queue[0]["coordinatorTeacherName"], "Ayşe Yılmaz");
}

#[tokio::test]
async fn pending_queue_filters_by_school() {
    let t = common::build_test_app();
    student_with_activity(&t.app).await;
    let other = create_student(&t.app, "Zeynep", "İzmir Atatürk Lisesi", "İzmir").await;
    log_activity(&t.app, &other, "2026-04-06", "Kermes", 2.0).await;

    let json = body_json(get(t.app.clone(), "/api/activities/pending?schoolName=FEN").await).await;
    let queue = json["data"].as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["studentName"], "Elif Test");

    let json = body_json(get(t.app, "/api/activities/pending?schoolName=yok").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Evidence files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_list_download_and_delete_file() {
    let t = common::build_test_app();
    let (_, activity) = student_with_activity(&t.app).await;

    let response = send(
        t.app.clone(),
        upload_request(&activity, &[("belge.pdf", "application/pdf", b"%PDF-1.4 test")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let file = &json["data"]["files"][0];
    assert_eq!(file["fileName"], "belge.pdf");
    assert_eq!(file["fileType"], "application/pdf");
    assert_eq!(file["fileSize"], 13);
    let file_id = file["id"].as_str().unwrap().to_string();

    let listed = body_json(get(t.app.clone(), &format!("/api/activities/{activity}/files")).await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let download = get(
        t.app.clone(),
        &format!("/api/activities/files/{file_id}/download"),
    )
    .await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert!(download.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("belge.pdf"));
    assert_eq!(&body_bytes(download).await[..], b"%PDF-1.4 test");

    let deleted = delete(t.app.clone(), &format!("/api/activities/files/{file_id}")).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = get(t.app, &format!("/api/activities/files/{file_id}/download")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disallowed_mime_type_is_rejected() {
    let t = common::build_test_app();
    let (_, activity) = student_with_activity(&t.app).await;

    let response = send(
        t.app.clone(),
        upload_request(&activity, &[("script.sh", "text/x-shellscript", b"echo hi")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(get(t.app, &format!("/api/activities/{activity}/files")).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn more_than_five_files_are_rejected() {
    let t = common::build_test_app();
    let (_, activity) = student_with_activity(&t.app).await;
    let parts: Vec<(&str, &str, &[u8])> = (0..6)
        .map(|_| ("foto.png", "image/png", b"png".as_slice()))
        .collect();

    let response = send(t.app, upload_request(&activity, &parts)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_to_unknown_activity_is_404() {
    let t = common::build_test_app();
    let id = uuid::Uuid::new_v4().to_string();

    let response = send(
        t.app,
        upload_request(&id, &[("belge.pdf", "application/pdf", b"%PDF")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
