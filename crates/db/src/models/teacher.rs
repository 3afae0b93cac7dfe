use inci_core::people::Teacher;
use inci_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Coordinator teacher row from the `teachers` table.
#[derive(Debug, Clone, FromRow)]
pub struct TeacherRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub school_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TeacherRow> for Teacher {
    fn from(row: TeacherRow) -> Self {
        Teacher {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            school_name: row.school_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
