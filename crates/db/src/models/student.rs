//! Student row from the `students` table.

use inci_core::people::Student;
use inci_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub grade: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub coordinator_teacher_name: Option<String>,
    pub target_hours: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            national_id: row.national_id,
            school_name: row.school_name,
            city: row.city,
            district: row.district,
            grade: row.grade,
            phone: row.phone,
            email: row.email,
            password_hash: row.password_hash,
            coordinator_teacher_name: row.coordinator_teacher_name,
            target_hours: row.target_hours,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
