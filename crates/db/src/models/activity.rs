//! Activity rows from the `activities` table.

use chrono::NaiveDate;
use inci_core::activity::{sanitize_hours, ActivityRecord, ActivityStatus};
use inci_core::error::CoreError;
use inci_core::store::StatusChange;
use inci_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: DbId,
    pub student_id: DbId,
    pub activity_date: NaiveDate,
    pub activity_type: String,
    pub hours: f64,
    pub description: String,
    pub status: String,
    pub review_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Row returned by the review update: the new row plus the status it replaced.
#[derive(Debug, Clone, FromRow)]
pub struct StatusChangeRow {
    pub previous_status: String,
    #[sqlx(flatten)]
    pub activity: ActivityRow,
}

fn parse_status(value: &str) -> Result<ActivityStatus, CoreError> {
    ActivityStatus::from_str_value(value).map_err(CoreError::Storage)
}

impl TryFrom<ActivityRow> for ActivityRecord {
    type Error = CoreError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(ActivityRecord {
            id: row.id,
            student_id: row.student_id,
            date: row.activity_date,
            activity_type: row.activity_type,
            hours: sanitize_hours(row.hours),
            description: row.description,
            status: parse_status(&row.status)?,
            review_note: row.review_note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<StatusChangeRow> for StatusChange {
    type Error = CoreError;

    fn try_from(row: StatusChangeRow) -> Result<Self, Self::Error> {
        Ok(StatusChange {
            previous: parse_status(&row.previous_status)?,
            activity: row.activity.try_into()?,
        })
    }
}
