//! Volunteer activity records, review statuses, and hours coercion.
//!
//! An activity is logged by a student in `pending` status and is later
//! approved or rejected by a teacher or head-office admin. Only approved
//! activities count toward hour totals and badges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid activity status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Review status of an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Pending,
    Approved,
    Rejected,
}

impl ActivityStatus {
    /// Convert from a stored or submitted string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid activity status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single logged volunteer activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: DbId,
    pub student_id: DbId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub hours: f64,
    pub description: String,
    pub status: ActivityStatus,
    pub review_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActivityRecord {
    pub fn is_approved(&self) -> bool {
        self.status == ActivityStatus::Approved
    }

    /// Hours this record contributes to any tally.
    ///
    /// Non-finite or negative values contribute zero.
    pub fn counted_hours(&self) -> f64 {
        sanitize_hours(self.hours)
    }
}

/// Validated input for logging a new activity. Always stored as `pending`.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub date: NaiveDate,
    pub activity_type: String,
    pub hours: f64,
    pub description: String,
}

/// Metadata of an evidence file attached to an activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFile {
    pub id: DbId,
    pub activity_id: DbId,
    /// Original client-side file name.
    pub file_name: String,
    /// Name of the stored file inside the upload directory.
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: Timestamp,
}

/// Input for recording a stored upload.
#[derive(Debug, Clone)]
pub struct NewActivityFile {
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

// ---------------------------------------------------------------------------
// Hours coercion
// ---------------------------------------------------------------------------

/// Clamp a stored hours value to a finite non-negative number.
///
/// Anything else degrades to zero; this is never an error.
pub fn sanitize_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours >= 0.0 {
        hours
    } else {
        tracing::debug!(hours, "Degraded hours value counted as zero");
        0.0
    }
}

/// Coerce a submitted `hours` JSON value into a number of hours.
///
/// Numbers and numeric strings are accepted; everything else (including
/// booleans, objects, unparseable strings and negative values) becomes zero.
pub fn coerce_hours(value: &serde_json::Value) -> f64 {
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.map(sanitize_hours).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
