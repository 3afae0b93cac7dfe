//! Repository for the `students` table.

use inci_core::people::{NewStudent, UpdateStudent, DEFAULT_TARGET_HOURS};
use inci_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::StudentRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, national_id, school_name, city, district, \
                       grade, phone, email, password_hash, coordinator_teacher_name, \
                       target_hours, created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewStudent) -> Result<StudentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (id, first_name, last_name, national_id, school_name, city,
                                   district, grade, phone, email, password_hash,
                                   coordinator_teacher_name, target_hours)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(DbId::new_v4())
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.national_id)
            .bind(&input.school_name)
            .bind(&input.city)
            .bind(&input.district)
            .bind(&input.grade)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.coordinator_teacher_name)
            .bind(input.target_hours.unwrap_or(DEFAULT_TARGET_HOURS))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all students in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<StudentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, StudentRow>(&query).fetch_all(pool).await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                national_id = COALESCE($4, national_id),
                school_name = COALESCE($5, school_name),
                city = COALESCE($6, city),
                district = COALESCE($7, district),
                grade = COALESCE($8, grade),
                phone = COALESCE($9, phone),
                email = COALESCE($10, email),
                coordinator_teacher_name = COALESCE($11, coordinator_teacher_name),
                target_hours = COALESCE($12, target_hours),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.national_id)
            .bind(&input.school_name)
            .bind(&input.city)
            .bind(&input.district)
            .bind(&input.grade)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.coordinator_teacher_name)
            .bind(input.target_hours)
            .fetch_optional(pool)
            .await
    }

    /// Replace the password hash. Returns `true` if a row was updated.
    pub async fn set_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
