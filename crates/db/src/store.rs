//! [`VolunteerStore`] backed by PostgreSQL.

use async_trait::async_trait;
use inci_core::activity::{ActivityFile, ActivityRecord, ActivityStatus, NewActivity, NewActivityFile};
use inci_core::error::CoreError;
use inci_core::people::{
    HeadOfficeAdmin, NewHeadOfficeAdmin, NewStudent, NewTeacher, Student, Teacher, UpdateStudent,
};
use inci_core::store::{StatusChange, StoreResult, VolunteerStore};
use inci_core::types::DbId;

use crate::repositories::{ActivityFileRepo, ActivityRepo, AdminRepo, StudentRepo, TeacherRepo};
use crate::DbPool;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign-key-violation SQLSTATE.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Map a driver error to the domain error, turning unique violations into
/// conflicts.
fn storage_error(err: sqlx::Error) -> CoreError {
    if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) {
        return CoreError::Conflict("A record with this email already exists".into());
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

/// Like [`storage_error`], but a foreign-key violation means the parent row
/// is missing.
fn missing_parent(entity: &'static str, id: DbId) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        if sqlstate(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            CoreError::NotFound { entity, id }
        } else {
            storage_error(err)
        }
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl VolunteerStore for PgStore {
    async fn create_student(&self, input: NewStudent) -> StoreResult<Student> {
        let row = StudentRepo::create(&self.pool, &input)
            .await
            .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn get_student(&self, id: DbId) -> StoreResult<Option<Student>> {
        let row = StudentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let row = StudentRepo::find_by_email(&self.pool, email)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn list_all_students(&self) -> StoreResult<Vec<Student>> {
        let rows = StudentRepo::list(&self.pool).await.map_err(storage_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_student(
        &self,
        id: DbId,
        patch: UpdateStudent,
    ) -> StoreResult<Option<Student>> {
        let row = StudentRepo::update(&self.pool, id, &patch)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn set_student_password(&self, id: DbId, password_hash: &str) -> StoreResult<bool> {
        StudentRepo::set_password(&self.pool, id, password_hash)
            .await
            .map_err(storage_error)
    }

    async fn create_teacher(&self, input: NewTeacher) -> StoreResult<Teacher> {
        let row = TeacherRepo::create(&self.pool, &input)
            .await
            .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn find_teacher_by_email(&self, email: &str) -> StoreResult<Option<Teacher>> {
        let row = TeacherRepo::find_by_email(&self.pool, email)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn count_teachers(&self) -> StoreResult<usize> {
        let count = TeacherRepo::count(&self.pool).await.map_err(storage_error)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn create_admin(&self, input: NewHeadOfficeAdmin) -> StoreResult<HeadOfficeAdmin> {
        let row = AdminRepo::create(&self.pool, &input)
            .await
            .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<HeadOfficeAdmin>> {
        let row = AdminRepo::find_by_email(&self.pool, email)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn list_admins(&self) -> StoreResult<Vec<HeadOfficeAdmin>> {
        let rows = AdminRepo::list(&self.pool).await.map_err(storage_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_activity(
        &self,
        student_id: DbId,
        input: NewActivity,
    ) -> StoreResult<ActivityRecord> {
        let row = ActivityRepo::create(&self.pool, student_id, &input)
            .await
            .map_err(missing_parent("student", student_id))?;
        ActivityRecord::try_from(row)
    }

    async fn get_activity(&self, id: DbId) -> StoreResult<Option<ActivityRecord>> {
        let row = ActivityRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        row.map(ActivityRecord::try_from).transpose()
    }

    async fn list_activities_by_student(
        &self,
        student_id: DbId,
    ) -> StoreResult<Vec<ActivityRecord>> {
        let rows = ActivityRepo::list_by_student(&self.pool, student_id)
            .await
            .map_err(storage_error)?;
        convert_all(rows)
    }

    async fn list_approved_activities(&self, student_id: DbId) -> StoreResult<Vec<ActivityRecord>> {
        let rows = ActivityRepo::list_approved_by_student(&self.pool, student_id)
            .await
            .map_err(storage_error)?;
        convert_all(rows)
    }

    async fn list_all_activities(&self) -> StoreResult<Vec<ActivityRecord>> {
        let rows = ActivityRepo::list(&self.pool).await.map_err(storage_error)?;
        convert_all(rows)
    }

    async fn update_activity_status(
        &self,
        id: DbId,
        status: ActivityStatus,
        review_note: Option<String>,
    ) -> StoreResult<Option<StatusChange>> {
        let row = ActivityRepo::update_status(&self.pool, id, status, review_note.as_deref())
            .await
            .map_err(storage_error)?;
        row.map(StatusChange::try_from).transpose()
    }

    async fn create_activity_file(
        &self,
        activity_id: DbId,
        input: NewActivityFile,
    ) -> StoreResult<ActivityFile> {
        let row = ActivityFileRepo::create(&self.pool, activity_id, &input)
            .await
            .map_err(missing_parent("activity", activity_id))?;
        Ok(row.into())
    }

    async fn list_activity_files(&self, activity_id: DbId) -> StoreResult<Vec<ActivityFile>> {
        let rows = ActivityFileRepo::list_by_activity(&self.pool, activity_id)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_activity_file(&self, id: DbId) -> StoreResult<Option<ActivityFile>> {
        let row = ActivityFileRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete_activity_file(&self, id: DbId) -> StoreResult<bool> {
        ActivityFileRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }
}
