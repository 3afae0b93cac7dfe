//! Service-layer tests against the in-memory store.

use assert_matches::assert_matches;
use chrono::{Datelike, Months, NaiveDate, TimeZone, Utc};
use inci_core::activity::{ActivityStatus, NewActivity};
use inci_core::badge::Badge;
use inci_core::error::CoreError;
use inci_core::people::{NewStudent, NewTeacher, Student};
use inci_core::review::PendingFilter;
use inci_core::service;
use inci_core::store::{InMemoryStore, VolunteerStore};
use inci_core::types::DbId;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn add_student(
    store: &InMemoryStore,
    first: &str,
    school: &str,
    city: &str,
    teacher: &str,
) -> Student {
    store
        .create_student(NewStudent {
            first_name: first.into(),
            last_name: "Öz".into(),
            school_name: Some(school.into()),
            city: Some(city.into()),
            coordinator_teacher_name: Some(teacher.into()),
            ..Default::default()
        })
        .await
        .unwrap()
}

async fn log(
    store: &InMemoryStore,
    student: &Student,
    date: NaiveDate,
    hours: f64,
    status: ActivityStatus,
) -> DbId {
    let activity = store
        .create_activity(
            student.id,
            NewActivity {
                date,
                activity_type: "Kermes".into(),
                hours,
                description: String::new(),
            },
        )
        .await
        .unwrap();
    if status != ActivityStatus::Pending {
        store
            .update_activity_status(activity.id, status, None)
            .await
            .unwrap();
    }
    activity.id
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overview_of_example_student() {
    let store = InMemoryStore::new();
    let s = add_student(&store, "Ece", "Lisesi A", "Ankara", "Ahmet").await;
    let other_month = today().checked_sub_months(Months::new(3)).unwrap();
    assert_eq!(other_month.year(), today().year());

    log(&store, &s, today(), 10.0, ActivityStatus::Approved).await;
    log(&store, &s, today(), 5.0, ActivityStatus::Pending).await;
    log(&store, &s, other_month, 8.0, ActivityStatus::Approved).await;

    let overview = service::student_overview(&store, s.id, today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(overview.summary.total, 18.0);
    assert_eq!(overview.summary.yearly, 18.0);
    assert_eq!(overview.summary.monthly, 10.0);
    assert_eq!(overview.badge, Badge::None);
    let next = overview.badge_status.next.unwrap();
    assert_eq!(next.badge, Badge::Bronz);
    assert_eq!(next.required_hours, 25.0);
    assert_eq!(overview.target_progress, 45.0);
}

#[tokio::test]
async fn overview_of_unknown_student_is_none() {
    let store = InMemoryStore::new();
    let result = service::student_overview(&store, DbId::new_v4(), today())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn report_of_unknown_student_is_none() {
    let store = InMemoryStore::new();
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    assert!(service::generate_student_report(&store, DbId::new_v4(), now)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn report_lists_only_approved_activities() {
    let store = InMemoryStore::new();
    let s = add_student(&store, "Ece", "Lisesi A", "Ankara", "Ahmet").await;
    log(&store, &s, today(), 30.0, ActivityStatus::Approved).await;
    log(&store, &s, today(), 3.0, ActivityStatus::Rejected).await;

    let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    let report = service::generate_student_report(&store, s.id, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.activity_count, 1);
    assert_eq!(report.badge, Badge::Bronz);
    assert_eq!(report.generated_at, now);
}

#[tokio::test]
async fn school_rollups_and_rankings_agree() {
    let store = InMemoryStore::new();
    let a = add_student(&store, "Ali", "Lisesi A", "Ankara", "Ahmet").await;
    let b = add_student(&store, "Banu", "Lisesi A", "Ankara", "Ahmet").await;
    let c = add_student(&store, "Cem", "Lisesi B", "İzmir", "Elif").await;
    log(&store, &a, today(), 30.0, ActivityStatus::Approved).await;
    log(&store, &b, today(), 70.0, ActivityStatus::Approved).await;
    log(&store, &c, today(), 40.0, ActivityStatus::Approved).await;
    log(&store, &c, today(), 90.0, ActivityStatus::Pending).await;

    let schools = service::aggregate_by_school(&store).await.unwrap();
    assert_eq!(schools[0].school_name, "Lisesi A");
    assert_eq!(schools[0].student_count, 2);
    assert_eq!(schools[0].total_hours, 100.0);

    let top = service::top_schools(&store, 1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0], schools[0]);

    let students = service::top_students(&store, 2).await.unwrap();
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Banu Öz", "Cem Öz"]);
}

#[tokio::test]
async fn overall_statistics_includes_teachers() {
    let store = InMemoryStore::new();
    store
        .create_teacher(NewTeacher {
            first_name: "Ahmet".into(),
            last_name: "Yıldız".into(),
            email: "ahmet@example.com".into(),
            password_hash: "x".into(),
            school_name: None,
        })
        .await
        .unwrap();
    let s = add_student(&store, "Ali", "Lisesi A", "Ankara", "Ahmet").await;
    log(&store, &s, today(), 4.0, ActivityStatus::Approved).await;
    log(&store, &s, today(), 4.0, ActivityStatus::Pending).await;

    let stats = service::overall_statistics(&store).await.unwrap();
    assert_eq!(stats.total_teachers, 1);
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.approved_activities, 1);
    assert_eq!(stats.pending_activities, 1);
    assert_eq!(stats.total_approved_hours, 4.0);
}

#[tokio::test]
async fn review_of_unknown_activity_is_not_found() {
    let store = InMemoryStore::new();
    let err = service::review_activity(&store, DbId::new_v4(), ActivityStatus::Approved, None)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "activity", .. });
}

#[tokio::test]
async fn re_review_is_allowed_and_last_decision_counts() {
    let store = InMemoryStore::new();
    let s = add_student(&store, "Ali", "Lisesi A", "Ankara", "Ahmet").await;
    let id = log(&store, &s, today(), 12.0, ActivityStatus::Pending).await;

    service::review_activity(&store, id, ActivityStatus::Approved, None)
        .await
        .unwrap();
    let summary = service::student_summary(&store, s.id, today()).await.unwrap();
    assert_eq!(summary.total, 12.0);

    let updated = service::review_activity(
        &store,
        id,
        ActivityStatus::Rejected,
        Some("Belge eksik".into()),
    )
    .await
    .unwrap();
    assert_eq!(updated.review_note.as_deref(), Some("Belge eksik"));
    let summary = service::student_summary(&store, s.id, today()).await.unwrap();
    assert_eq!(summary.total, 0.0);
}

#[tokio::test]
async fn pending_queue_filters_by_teacher_and_school() {
    let store = InMemoryStore::new();
    let a = add_student(&store, "Ali", "Kadıköy Lisesi", "İstanbul", "Ahmet Kara").await;
    let b = add_student(&store, "Banu", "Fen Lisesi", "Ankara", "Elif Ak").await;
    log(&store, &a, today(), 1.0, ActivityStatus::Pending).await;
    log(&store, &a, today(), 2.0, ActivityStatus::Approved).await;
    log(&store, &b, today(), 3.0, ActivityStatus::Pending).await;

    let all = service::pending_review_queue(&store, &PendingFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filter = PendingFilter {
        teacher_name: Some("AHMET".into()),
        school_name: Some("kadıköy".into()),
    };
    let queue = service::pending_review_queue(&store, &filter).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].student_name, "Ali Öz");
    assert_eq!(queue[0].activity.hours, 1.0);
}

#[tokio::test]
async fn monthly_and_type_stats_come_from_all_activities() {
    let store = InMemoryStore::new();
    let s = add_student(&store, "Ali", "Lisesi A", "Ankara", "Ahmet").await;
    let march = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    log(&store, &s, march, 2.0, ActivityStatus::Approved).await;
    log(&store, &s, march, 6.0, ActivityStatus::Rejected).await;

    let months = service::monthly_stats(&store, 2026).await.unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].month, "03");
    assert_eq!(months[0].activity_count, 2);
    assert_eq!(months[0].total_hours, 2.0);

    let types = service::activity_type_stats(&store).await.unwrap();
    assert_eq!(types[0].count, 2);
    assert_eq!(types[0].total_hours, 2.0);

    let cities = service::statistics_by_city(&store).await.unwrap();
    assert_eq!(cities[0].activity_count, 1);
}
