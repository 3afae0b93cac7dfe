use inci_core::activity::ActivityFile;
use inci_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Evidence file row from the `activity_files` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityFileRow {
    pub id: DbId,
    pub activity_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: Timestamp,
}

impl From<ActivityFileRow> for ActivityFile {
    fn from(row: ActivityFileRow) -> Self {
        ActivityFile {
            id: row.id,
            activity_id: row.activity_id,
            file_name: row.file_name,
            file_path: row.file_path,
            file_type: row.file_type,
            file_size: row.file_size,
            created_at: row.created_at,
        }
    }
}
