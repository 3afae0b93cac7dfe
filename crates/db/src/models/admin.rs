use inci_core::people::HeadOfficeAdmin;
use inci_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Head-office administrator row from the `head_office_admins` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminRow {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AdminRow> for HeadOfficeAdmin {
    fn from(row: AdminRow) -> Self {
        HeadOfficeAdmin {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
