//! Store-backed entry points for handlers.
//!
//! Each function reads what it needs from a [`VolunteerStore`] and delegates
//! to the pure engines in [`summary`](crate::summary),
//! [`badge`](crate::badge), [`rollup`](crate::rollup) and
//! [`report`](crate::report). Nothing is cached; every call recomputes from
//! the current store contents. Storage errors propagate unchanged.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::activity::{ActivityRecord, ActivityStatus};
use crate::badge::{badge_status, calculate_badge, target_progress, Badge, BadgeStatus};
use crate::error::CoreError;
use crate::people::Student;
use crate::report::{build_student_report, StudentReport};
use crate::review::{PendingFilter, ReviewItem};
use crate::rollup::{
    self, ActivityTypeStatistics, CityStatistics, MonthlyStatistics, OverallStatistics,
    SchoolAggregate, TopStudent,
};
use crate::store::VolunteerStore;
use crate::summary::{compute_summary, Summary};
use crate::types::{DbId, Timestamp};

/// Number of rows returned by the top-N rankings when no limit is given.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// A student with their derived hours, badge and goal progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    pub student: Student,
    pub summary: Summary,
    pub badge: Badge,
    pub badge_status: BadgeStatus,
    pub target_progress: f64,
}

// ---------------------------------------------------------------------------
// Per-student
// ---------------------------------------------------------------------------

/// Approved-hour summary of one student as of `today`.
pub async fn student_summary(
    store: &dyn VolunteerStore,
    student_id: DbId,
    today: NaiveDate,
) -> Result<Summary, CoreError> {
    let approved = store.list_approved_activities(student_id).await?;
    Ok(compute_summary(&approved, today))
}

/// Student plus summary, badge and goal progress. `None` for an unknown id.
pub async fn student_overview(
    store: &dyn VolunteerStore,
    student_id: DbId,
    today: NaiveDate,
) -> Result<Option<StudentOverview>, CoreError> {
    let Some(student) = store.get_student(student_id).await? else {
        return Ok(None);
    };

    let summary = student_summary(store, student.id, today).await?;
    let target_progress = target_progress(summary.total, student.target_hours);

    Ok(Some(StudentOverview {
        badge: calculate_badge(summary.total),
        badge_status: badge_status(summary.total),
        target_progress,
        summary,
        student,
    }))
}

/// Printable report of a student's approved volunteering.
///
/// Returns `Ok(None)` when the student does not exist.
pub async fn generate_student_report(
    store: &dyn VolunteerStore,
    student_id: DbId,
    now: Timestamp,
) -> Result<Option<StudentReport>, CoreError> {
    let Some(student) = store.get_student(student_id).await? else {
        return Ok(None);
    };
    let approved = store.list_approved_activities(student.id).await?;
    Ok(Some(build_student_report(student, approved, now)))
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

async fn load_all(
    store: &dyn VolunteerStore,
) -> Result<(Vec<Student>, Vec<ActivityRecord>), CoreError> {
    let students = store.list_all_students().await?;
    let activities = store.list_all_activities().await?;
    Ok((students, activities))
}

pub async fn aggregate_by_school(
    store: &dyn VolunteerStore,
) -> Result<Vec<SchoolAggregate>, CoreError> {
    let (students, activities) = load_all(store).await?;
    Ok(rollup::aggregate_by_school(&students, &activities))
}

pub async fn top_students(
    store: &dyn VolunteerStore,
    limit: usize,
) -> Result<Vec<TopStudent>, CoreError> {
    let (students, activities) = load_all(store).await?;
    Ok(rollup::top_students(&students, &activities, limit))
}

pub async fn top_schools(
    store: &dyn VolunteerStore,
    limit: usize,
) -> Result<Vec<SchoolAggregate>, CoreError> {
    let (students, activities) = load_all(store).await?;
    Ok(rollup::top_schools(&students, &activities, limit))
}

pub async fn statistics_by_city(
    store: &dyn VolunteerStore,
) -> Result<Vec<CityStatistics>, CoreError> {
    let (students, activities) = load_all(store).await?;
    Ok(rollup::statistics_by_city(&students, &activities))
}

pub async fn activity_type_stats(
    store: &dyn VolunteerStore,
) -> Result<Vec<ActivityTypeStatistics>, CoreError> {
    let activities = store.list_all_activities().await?;
    Ok(rollup::activity_type_stats(&activities))
}

pub async fn monthly_stats(
    store: &dyn VolunteerStore,
    year: i32,
) -> Result<Vec<MonthlyStatistics>, CoreError> {
    let activities = store.list_all_activities().await?;
    Ok(rollup::monthly_stats(&activities, year))
}

pub async fn overall_statistics(
    store: &dyn VolunteerStore,
) -> Result<OverallStatistics, CoreError> {
    let (students, activities) = load_all(store).await?;
    let teachers = store.count_teachers().await?;
    Ok(rollup::overall_statistics(&students, teachers, &activities))
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// Record a review decision on an activity.
///
/// Re-deciding an already approved or rejected activity is allowed; the
/// previous status is logged so corrections stay visible.
pub async fn review_activity(
    store: &dyn VolunteerStore,
    activity_id: DbId,
    status: ActivityStatus,
    review_note: Option<String>,
) -> Result<ActivityRecord, CoreError> {
    let change = store
        .update_activity_status(activity_id, status, review_note)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "activity",
            id: activity_id,
        })?;

    if change.previous == ActivityStatus::Pending {
        tracing::info!(
            activity_id = %activity_id,
            previous = %change.previous,
            status = %status,
            "Activity reviewed",
        );
    } else {
        tracing::warn!(
            activity_id = %activity_id,
            previous = %change.previous,
            status = %status,
            "Activity re-reviewed after an earlier decision",
        );
    }

    Ok(change.activity)
}

/// Pending activities joined with their students and files, filtered by
/// coordinator teacher and school. Activities of unknown students are skipped.
pub async fn pending_review_queue(
    store: &dyn VolunteerStore,
    filter: &PendingFilter,
) -> Result<Vec<ReviewItem>, CoreError> {
    let (students, activities) = load_all(store).await?;
    let by_id: HashMap<DbId, &Student> = students.iter().map(|s| (s.id, s)).collect();

    let mut queue = Vec::new();
    for activity in activities
        .into_iter()
        .filter(|a| a.status == ActivityStatus::Pending)
    {
        let Some(student) = by_id.get(&activity.student_id).copied() else {
            continue;
        };
        if !filter.matches(student) {
            continue;
        }
        let files = store.list_activity_files(activity.id).await?;
        queue.push(ReviewItem::new(activity, Some(student), files));
    }

    Ok(queue)
}

/// Every activity with student display fields and files, for head office.
pub async fn enriched_activities(
    store: &dyn VolunteerStore,
) -> Result<Vec<ReviewItem>, CoreError> {
    let (students, activities) = load_all(store).await?;
    let by_id: HashMap<DbId, &Student> = students.iter().map(|s| (s.id, s)).collect();

    let mut items = Vec::with_capacity(activities.len());
    for activity in activities {
        let student = by_id.get(&activity.student_id).copied();
        let files = store.list_activity_files(activity.id).await?;
        items.push(ReviewItem::new(activity, student, files));
    }

    Ok(items)
}
