//! Repository for the `head_office_admins` table.

use inci_core::people::NewHeadOfficeAdmin;
use inci_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin::AdminRow;

const COLUMNS: &str = "id, first_name, last_name, email, password_hash, created_at, updated_at";

pub struct AdminRepo;

impl AdminRepo {
    pub async fn create(pool: &PgPool, input: &NewHeadOfficeAdmin) -> Result<AdminRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO head_office_admins (id, first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminRow>(&query)
            .bind(DbId::new_v4())
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM head_office_admins WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, AdminRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List admins, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AdminRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM head_office_admins ORDER BY created_at DESC");
        sqlx::query_as::<_, AdminRow>(&query).fetch_all(pool).await
    }
}
