//! Repository for the `activity_files` table.

use inci_core::activity::NewActivityFile;
use inci_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity_file::ActivityFileRow;

const COLUMNS: &str = "id, activity_id, file_name, file_path, file_type, file_size, created_at";

pub struct ActivityFileRepo;

impl ActivityFileRepo {
    pub async fn create(
        pool: &PgPool,
        activity_id: DbId,
        input: &NewActivityFile,
    ) -> Result<ActivityFileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_files (id, activity_id, file_name, file_path, file_type, file_size)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityFileRow>(&query)
            .bind(DbId::new_v4())
            .bind(activity_id)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.file_type)
            .bind(input.file_size)
            .fetch_one(pool)
            .await
    }

    /// Files attached to an activity, oldest upload first.
    pub async fn list_by_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<ActivityFileRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_files WHERE activity_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ActivityFileRow>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ActivityFileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activity_files WHERE id = $1");
        sqlx::query_as::<_, ActivityFileRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a file record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activity_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
