//! The storage collaborator consumed by the aggregation and rollup services.
//!
//! Handlers and services receive a `&dyn VolunteerStore` instead of reaching
//! for global state, so every computation can run against an isolated store.
//!
//! # Implementations
//!
//! - [`InMemoryStore`]: process-local store for development and tests
//! - `PgStore` (in `inci-db`): PostgreSQL storage

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::activity::{ActivityFile, ActivityRecord, ActivityStatus, NewActivity, NewActivityFile};
use crate::error::CoreError;
use crate::people::{
    HeadOfficeAdmin, NewHeadOfficeAdmin, NewStudent, NewTeacher, Student, Teacher, UpdateStudent,
};
use crate::types::DbId;

pub type StoreResult<T> = Result<T, CoreError>;

/// Outcome of a review decision: the updated record and the status it replaced.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub previous: ActivityStatus,
    pub activity: ActivityRecord,
}

/// Persistence operations for students, staff, activities and evidence files.
///
/// Every method may fail with a storage error, which callers propagate
/// unchanged. Lookups by id return `Ok(None)` rather than an error when the
/// entity does not exist.
#[async_trait]
pub trait VolunteerStore: Send + Sync {
    // -- Students -------------------------------------------------------------

    async fn create_student(&self, input: NewStudent) -> StoreResult<Student>;

    async fn get_student(&self, id: DbId) -> StoreResult<Option<Student>>;

    async fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>>;

    /// All students in creation order.
    async fn list_all_students(&self) -> StoreResult<Vec<Student>>;

    async fn update_student(&self, id: DbId, patch: UpdateStudent)
        -> StoreResult<Option<Student>>;

    /// Replace a student's password hash. Returns `false` for an unknown id.
    async fn set_student_password(&self, id: DbId, password_hash: &str) -> StoreResult<bool>;

    // -- Teachers and head-office admins -----------------------------------

    async fn create_teacher(&self, input: NewTeacher) -> StoreResult<Teacher>;

    async fn find_teacher_by_email(&self, email: &str) -> StoreResult<Option<Teacher>>;

    async fn count_teachers(&self) -> StoreResult<usize>;

    async fn create_admin(&self, input: NewHeadOfficeAdmin) -> StoreResult<HeadOfficeAdmin>;

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<HeadOfficeAdmin>>;

    async fn list_admins(&self) -> StoreResult<Vec<HeadOfficeAdmin>>;

    // -- Activities ---------------------------------------------------------

    /// Store a new activity in `pending` status.
    async fn create_activity(
        &self,
        student_id: DbId,
        input: NewActivity,
    ) -> StoreResult<ActivityRecord>;

    async fn get_activity(&self, id: DbId) -> StoreResult<Option<ActivityRecord>>;

    async fn list_activities_by_student(&self, student_id: DbId)
        -> StoreResult<Vec<ActivityRecord>>;

    /// A student's approved activities.
    async fn list_approved_activities(&self, student_id: DbId) -> StoreResult<Vec<ActivityRecord>> {
        let mut activities = self.list_activities_by_student(student_id).await?;
        activities.retain(ActivityRecord::is_approved);
        Ok(activities)
    }

    /// Every activity of every status, in creation order.
    async fn list_all_activities(&self) -> StoreResult<Vec<ActivityRecord>>;

    /// Atomically set status and review note. Concurrent updates to the same
    /// record resolve last-write-wins. Returns `None` for an unknown id.
    async fn update_activity_status(
        &self,
        id: DbId,
        status: ActivityStatus,
        review_note: Option<String>,
    ) -> StoreResult<Option<StatusChange>>;

    // -- Evidence files -----------------------------------------------------

    async fn create_activity_file(
        &self,
        activity_id: DbId,
        input: NewActivityFile,
    ) -> StoreResult<ActivityFile>;

    async fn list_activity_files(&self, activity_id: DbId) -> StoreResult<Vec<ActivityFile>>;

    async fn get_activity_file(&self, id: DbId) -> StoreResult<Option<ActivityFile>>;

    /// Returns `false` when no such file existed.
    async fn delete_activity_file(&self, id: DbId) -> StoreResult<bool>;
}
