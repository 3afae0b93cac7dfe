//! Demo data for local development (`SEED_DEMO_DATA=true`).
//!
//! Only runs against a store without students, so restarting a seeded
//! server never duplicates rows.

use chrono::{Days, NaiveDate};
use inci_core::activity::{ActivityStatus, NewActivity};
use inci_core::error::CoreError;
use inci_core::people::{NewHeadOfficeAdmin, NewStudent, NewTeacher};
use inci_core::store::VolunteerStore;

use crate::auth::password::hash_password;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "inci2024";

/// What a seeding run inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub teachers: usize,
    pub admins: usize,
    pub students: usize,
    pub activities: usize,
}

struct DemoStudent {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    school: &'static str,
    city: &'static str,
    district: &'static str,
    grade: &'static str,
    /// `(days ago, type, hours, status)`
    activities: &'static [(u64, &'static str, f64, ActivityStatus)],
}

const COORDINATOR: &str = "Ayşe Yılmaz";

const DEMO_STUDENTS: &[DemoStudent] = &[
    DemoStudent {
        first_name: "Elif",
        last_name: "Demir",
        email: "elif.demir@example.com",
        school: "Ankara Fen Lisesi",
        city: "Ankara",
        district: "Keçiören",
        grade: "11",
        activities: &[
            (3, "Hastane ziyareti", 4.0, ActivityStatus::Approved),
            (20, "Kermes", 6.0, ActivityStatus::Approved),
            (45, "Bağış kampanyası", 18.0, ActivityStatus::Approved),
            (1, "Farkındalık semineri", 2.0, ActivityStatus::Pending),
        ],
    },
    DemoStudent {
        first_name: "Can",
        last_name: "Aydın",
        email: "can.aydin@example.com",
        school: "Ankara Fen Lisesi",
        city: "Ankara",
        district: "Çankaya",
        grade: "10",
        activities: &[
            (10, "Kermes", 5.0, ActivityStatus::Approved),
            (12, "Sosyal medya tanıtımı", 3.0, ActivityStatus::Rejected),
            (2, "Hastane ziyareti", 4.0, ActivityStatus::Pending),
        ],
    },
    DemoStudent {
        first_name: "Zeynep",
        last_name: "Koç",
        email: "zeynep.koc@example.com",
        school: "İzmir Atatürk Lisesi",
        city: "İzmir",
        district: "Konak",
        grade: "12",
        activities: &[
            (30, "Bağış kampanyası", 40.0, ActivityStatus::Approved),
            (60, "Kermes", 25.0, ActivityStatus::Approved),
        ],
    },
];

/// Insert the demo teacher, admin, students and activities.
///
/// Returns an empty report when the store already has students.
pub async fn seed_demo_data(
    store: &dyn VolunteerStore,
    today: NaiveDate,
) -> Result<SeedReport, CoreError> {
    if !store.list_all_students().await?.is_empty() {
        tracing::info!("Store already has students, skipping demo seed");
        return Ok(SeedReport::default());
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;
    let mut report = SeedReport::default();

    store
        .create_teacher(NewTeacher {
            first_name: "Ayşe".into(),
            last_name: "Yılmaz".into(),
            email: "ayse.yilmaz@example.com".into(),
            password_hash: password_hash.clone(),
            school_name: Some("Ankara Fen Lisesi".into()),
        })
        .await?;
    report.teachers += 1;

    store
        .create_admin(NewHeadOfficeAdmin {
            first_name: "Genel".into(),
            last_name: "Merkez".into(),
            email: "merkez@example.com".into(),
            password_hash: password_hash.clone(),
        })
        .await?;
    report.admins += 1;

    for demo in DEMO_STUDENTS {
        let student = store
            .create_student(NewStudent {
                first_name: demo.first_name.into(),
                last_name: demo.last_name.into(),
                school_name: Some(demo.school.into()),
                city: Some(demo.city.into()),
                district: Some(demo.district.into()),
                grade: Some(demo.grade.into()),
                email: Some(demo.email.into()),
                password_hash: Some(password_hash.clone()),
                coordinator_teacher_name: Some(COORDINATOR.into()),
                ..Default::default()
            })
            .await?;
        report.students += 1;

        for &(days_ago, activity_type, hours, status) in demo.activities {
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
            let activity = store
                .create_activity(
                    student.id,
                    NewActivity {
                        date,
                        activity_type: activity_type.into(),
                        hours,
                        description: format!("{activity_type} etkinliği"),
                    },
                )
                .await?;
            if status != ActivityStatus::Pending {
                store
                    .update_activity_status(activity.id, status, None)
                    .await?;
            }
            report.activities += 1;
        }
    }

    tracing::info!(
        teachers = report.teachers,
        admins = report.admins,
        students = report.students,
        activities = report.activities,
        "Demo data seeded",
    );
    Ok(report)
}
