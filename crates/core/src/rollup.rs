//! Cross-student and cross-school rollups.
//!
//! Every function here is a pure reduction over the full student and
//! activity collections. Students without a school (or city) are left out of
//! that grouping rather than treated as an error. Hour figures only ever
//! include approved activities; counts document which statuses they include.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use serde::Serialize;

use crate::activity::{ActivityRecord, ActivityStatus};
use crate::people::Student;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolAggregate {
    pub school_name: String,
    pub student_count: usize,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStudent {
    pub id: DbId,
    pub name: String,
    pub school_name: Option<String>,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStatistics {
    pub city: String,
    pub student_count: usize,
    /// Approved activities only.
    pub activity_count: usize,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypeStatistics {
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Activities of any status.
    pub count: usize,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    /// Zero-padded month number, `"01"` to `"12"`.
    pub month: String,
    /// Activities of any status.
    pub activity_count: usize,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStatistics {
    pub total_students: usize,
    pub total_teachers: usize,
    pub total_activities: usize,
    pub approved_activities: usize,
    pub pending_activities: usize,
    pub rejected_activities: usize,
    pub total_approved_hours: f64,
    pub total_schools: usize,
    pub total_cities: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct ApprovedTally {
    hours: f64,
    count: usize,
}

/// Approved hours and approved activity count per student.
fn approved_by_student(activities: &[ActivityRecord]) -> HashMap<DbId, ApprovedTally> {
    let mut tallies: HashMap<DbId, ApprovedTally> = HashMap::new();
    for activity in activities.iter().filter(|a| a.is_approved()) {
        let tally = tallies.entry(activity.student_id).or_default();
        tally.hours += activity.counted_hours();
        tally.count += 1;
    }
    tallies
}

/// Descending by hours. `sort_by` is stable, so equal totals keep input order.
fn sort_desc_by_hours<T>(items: &mut [T], hours: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| hours(b).total_cmp(&hours(a)));
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

/// Group students by school with their combined approved hours.
///
/// Ordered by school name.
pub fn aggregate_by_school(
    students: &[Student],
    activities: &[ActivityRecord],
) -> Vec<SchoolAggregate> {
    let tallies = approved_by_student(activities);
    let mut groups: BTreeMap<&str, (HashSet<DbId>, f64)> = BTreeMap::new();

    for student in students {
        let Some(school) = student.school() else {
            continue;
        };
        let (members, hours) = groups.entry(school).or_default();
        if members.insert(student.id) {
            *hours += tallies.get(&student.id).map_or(0.0, |t| t.hours);
        }
    }

    groups
        .into_iter()
        .map(|(school_name, (members, total_hours))| SchoolAggregate {
            school_name: school_name.to_string(),
            student_count: members.len(),
            total_hours,
        })
        .collect()
}

/// The `limit` students with the most approved hours.
///
/// Students with no approved activity never appear. Ties keep the order of
/// `students`.
pub fn top_students(
    students: &[Student],
    activities: &[ActivityRecord],
    limit: usize,
) -> Vec<TopStudent> {
    let tallies = approved_by_student(activities);

    let mut ranked: Vec<TopStudent> = students
        .iter()
        .filter_map(|student| {
            let tally = tallies.get(&student.id)?;
            Some(TopStudent {
                id: student.id,
                name: student.full_name(),
                school_name: student.school_name.clone(),
                total_hours: tally.hours,
            })
        })
        .collect();

    sort_desc_by_hours(&mut ranked, |s| s.total_hours);
    ranked.truncate(limit);
    ranked
}

/// [`aggregate_by_school`] ranked by hours and truncated to `limit`.
pub fn top_schools(
    students: &[Student],
    activities: &[ActivityRecord],
    limit: usize,
) -> Vec<SchoolAggregate> {
    rank_schools(aggregate_by_school(students, activities), limit)
}

/// Rank an existing school aggregation. Ties keep their relative order.
pub fn rank_schools(mut schools: Vec<SchoolAggregate>, limit: usize) -> Vec<SchoolAggregate> {
    sort_desc_by_hours(&mut schools, |s| s.total_hours);
    schools.truncate(limit);
    schools
}

/// Per-city student counts, approved activity counts and approved hours.
///
/// Ordered by hours descending.
pub fn statistics_by_city(
    students: &[Student],
    activities: &[ActivityRecord],
) -> Vec<CityStatistics> {
    let tallies = approved_by_student(activities);
    let mut groups: BTreeMap<&str, (HashSet<DbId>, ApprovedTally)> = BTreeMap::new();

    for student in students {
        let Some(city) = student.city() else {
            continue;
        };
        let (members, totals) = groups.entry(city).or_default();
        if members.insert(student.id) {
            if let Some(t) = tallies.get(&student.id) {
                totals.hours += t.hours;
                totals.count += t.count;
            }
        }
    }

    let mut stats: Vec<CityStatistics> = groups
        .into_iter()
        .map(|(city, (members, totals))| CityStatistics {
            city: city.to_string(),
            student_count: members.len(),
            activity_count: totals.count,
            total_hours: totals.hours,
        })
        .collect();

    sort_desc_by_hours(&mut stats, |s| s.total_hours);
    stats
}

/// Per-type activity counts (all statuses) and approved hours.
///
/// Ordered by count descending; equal counts stay alphabetical.
pub fn activity_type_stats(activities: &[ActivityRecord]) -> Vec<ActivityTypeStatistics> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();

    for activity in activities {
        let (count, hours) = groups.entry(activity.activity_type.as_str()).or_default();
        *count += 1;
        if activity.is_approved() {
            *hours += activity.counted_hours();
        }
    }

    let mut stats: Vec<ActivityTypeStatistics> = groups
        .into_iter()
        .map(|(activity_type, (count, total_hours))| ActivityTypeStatistics {
            activity_type: activity_type.to_string(),
            count,
            total_hours,
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Per-month activity counts (all statuses) and approved hours for `year`.
///
/// Months without any activity are omitted rather than zero-filled.
pub fn monthly_stats(activities: &[ActivityRecord], year: i32) -> Vec<MonthlyStatistics> {
    let mut months: BTreeMap<u32, (usize, f64)> = BTreeMap::new();

    for activity in activities.iter().filter(|a| a.date.year() == year) {
        let (count, hours) = months.entry(activity.date.month()).or_default();
        *count += 1;
        if activity.is_approved() {
            *hours += activity.counted_hours();
        }
    }

    months
        .into_iter()
        .map(|(month, (activity_count, total_hours))| MonthlyStatistics {
            month: format!("{month:02}"),
            activity_count,
            total_hours,
        })
        .collect()
}

/// Dashboard-wide totals. Every figure is zero on empty input.
pub fn overall_statistics(
    students: &[Student],
    teacher_count: usize,
    activities: &[ActivityRecord],
) -> OverallStatistics {
    let count_status = |status: ActivityStatus| {
        activities.iter().filter(|a| a.status == status).count()
    };

    let schools: HashSet<&str> = students.iter().filter_map(Student::school).collect();
    let cities: HashSet<&str> = students.iter().filter_map(Student::city).collect();

    OverallStatistics {
        total_students: students.len(),
        total_teachers: teacher_count,
        total_activities: activities.len(),
        approved_activities: count_status(ActivityStatus::Approved),
        pending_activities: count_status(ActivityStatus::Pending),
        rejected_activities: count_status(ActivityStatus::Rejected),
        total_approved_hours: crate::summary::approved_hours(activities),
        total_schools: schools.len(),
        total_cities: cities.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
