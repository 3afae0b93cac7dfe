//! Student volunteering report (used for university applications).

use serde::Serialize;

use crate::activity::ActivityRecord;
use crate::badge::{calculate_badge, Badge};
use crate::people::Student;
use crate::summary::{compute_summary, Summary};
use crate::types::Timestamp;

/// Document type label printed on every generated report.
pub const REPORT_DOCUMENT_TYPE: &str = "Gönüllülük Faaliyet Raporu";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    /// Serialized without credentials.
    pub student: Student,
    pub summary: Summary,
    pub badge: Badge,
    /// Approved activities only, most recent first.
    pub activities: Vec<ActivityRecord>,
    pub activity_count: usize,
    /// When the report was generated, not when the data changed.
    pub generated_at: Timestamp,
    pub document_type: &'static str,
}

/// Assemble a report from a student and any of their activity records.
pub fn build_student_report(
    student: Student,
    activities: Vec<ActivityRecord>,
    now: Timestamp,
) -> StudentReport {
    let mut approved: Vec<ActivityRecord> =
        activities.into_iter().filter(|a| a.is_approved()).collect();
    approved.sort_by(|a, b| b.date.cmp(&a.date));

    let summary = compute_summary(&approved, now.date_naive());
    let badge = calculate_badge(summary.total);

    StudentReport {
        student,
        summary,
        badge,
        activity_count: approved.len(),
        activities: approved,
        generated_at: now,
        document_type: REPORT_DOCUMENT_TYPE,
    }
}
