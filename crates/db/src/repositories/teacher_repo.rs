//! Repository for the `teachers` table.

use inci_core::people::NewTeacher;
use inci_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::TeacherRow;

const COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, school_name, created_at, updated_at";

pub struct TeacherRepo;

impl TeacherRepo {
    pub async fn create(pool: &PgPool, input: &NewTeacher) -> Result<TeacherRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers (id, first_name, last_name, email, password_hash, school_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeacherRow>(&query)
            .bind(DbId::new_v4())
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.school_name)
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<TeacherRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, TeacherRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teachers")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
