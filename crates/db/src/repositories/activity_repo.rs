//! Repository for the `activities` table.

use inci_core::activity::{ActivityStatus, NewActivity, STATUS_APPROVED};
use inci_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityRow, StatusChangeRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, activity_date, activity_type, hours, description, \
                       status, review_note, created_at, updated_at";

/// Provides CRUD and review operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity in `pending` status.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        input: &NewActivity,
    ) -> Result<ActivityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (id, student_id, activity_date, activity_type, hours, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(DbId::new_v4())
            .bind(student_id)
            .bind(input.date)
            .bind(&input.activity_type)
            .bind(input.hours)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A student's activities, newest activity date first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities WHERE student_id = $1
             ORDER BY activity_date DESC, created_at DESC"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_approved_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities WHERE student_id = $1 AND status = $2
             ORDER BY activity_date DESC, created_at DESC"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(student_id)
            .bind(STATUS_APPROVED)
            .fetch_all(pool)
            .await
    }

    /// Every activity in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, ActivityRow>(&query).fetch_all(pool).await
    }

    /// Set status and review note in one statement, returning the previous
    /// status alongside the updated row.
    ///
    /// The row lock taken by the CTE serialises concurrent reviews of the
    /// same activity; the last writer wins.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ActivityStatus,
        review_note: Option<&str>,
    ) -> Result<Option<StatusChangeRow>, sqlx::Error> {
        let returning = COLUMNS
            .split(", ")
            .map(|c| format!("a.{}", c.trim()))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "WITH prev AS (
                SELECT id, status FROM activities WHERE id = $1 FOR UPDATE
             )
             UPDATE activities a SET
                status = $2,
                review_note = $3,
                updated_at = NOW()
             FROM prev
             WHERE a.id = prev.id
             RETURNING prev.status AS previous_status, {returning}"
        );
        sqlx::query_as::<_, StatusChangeRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(review_note)
            .fetch_optional(pool)
            .await
    }
}
