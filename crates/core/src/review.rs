//! Review queue shaping: joining activities with their students and
//! filtering the pending queue for a coordinator teacher or school.

use serde::Serialize;

use crate::activity::{ActivityFile, ActivityRecord};
use crate::people::Student;

/// Student name shown for an activity whose student no longer exists.
pub const UNKNOWN_STUDENT_NAME: &str = "Bilinmiyor";

/// Optional substring filters for the pending review queue.
#[derive(Debug, Clone, Default)]
pub struct PendingFilter {
    pub teacher_name: Option<String>,
    pub school_name: Option<String>,
}

impl PendingFilter {
    /// Whether a student passes the filter.
    ///
    /// Matching is a case-insensitive substring test. A filter only applies
    /// when the student actually has a non-blank value for the field;
    /// students without a coordinator teacher or school are never excluded
    /// by it.
    pub fn matches(&self, student: &Student) -> bool {
        contains_ci(
            student.coordinator_teacher_name.as_deref(),
            self.teacher_name.as_deref(),
        ) && contains_ci(student.school_name.as_deref(), self.school_name.as_deref())
    }
}

fn contains_ci(value: Option<&str>, needle: Option<&str>) -> bool {
    let value = value.filter(|v| !v.trim().is_empty());
    match (value, needle.filter(|n| !n.is_empty())) {
        (Some(value), Some(needle)) => value.to_lowercase().contains(&needle.to_lowercase()),
        _ => true,
    }
}

/// An activity with its student's display fields and evidence files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    #[serde(flatten)]
    pub activity: ActivityRecord,
    pub student_name: String,
    pub school_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator_teacher_name: Option<String>,
    pub files: Vec<ActivityFile>,
}

impl ReviewItem {
    /// Join an activity with its (possibly missing) student.
    pub fn new(
        activity: ActivityRecord,
        student: Option<&Student>,
        files: Vec<ActivityFile>,
    ) -> Self {
        match student {
            Some(s) => Self {
                activity,
                student_name: s.full_name(),
                school_name: s.school_name.clone().unwrap_or_default(),
                coordinator_teacher_name: s.coordinator_teacher_name.clone(),
                files,
            },
            None => Self {
                activity,
                student_name: UNKNOWN_STUDENT_NAME.to_string(),
                school_name: String::new(),
                coordinator_teacher_name: None,
                files,
            },
        }
    }
}
