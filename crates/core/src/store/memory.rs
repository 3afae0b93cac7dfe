//! In-memory [`VolunteerStore`] used for local development and tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StatusChange, StoreResult, VolunteerStore};
use crate::activity::{ActivityFile, ActivityRecord, ActivityStatus, NewActivity, NewActivityFile};
use crate::error::CoreError;
use crate::people::{
    HeadOfficeAdmin, NewHeadOfficeAdmin, NewStudent, NewTeacher, Student, Teacher, UpdateStudent,
    DEFAULT_TARGET_HOURS,
};
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    admins: Vec<HeadOfficeAdmin>,
    activities: Vec<ActivityRecord>,
    files: Vec<ActivityFile>,
}

/// Store that keeps every table in insertion-ordered vectors behind one lock.
///
/// A single write lock guards each mutation, so a status update is atomic
/// and the last writer wins.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn student_count(&self) -> usize {
        self.tables.read().await.students.len()
    }
}

/// Matches the `LOWER(email)` unique indexes of the Postgres schema.
fn same_email(a: Option<&str>, b: &str) -> bool {
    a.is_some_and(|a| a.to_lowercase() == b.to_lowercase())
}

fn duplicate_email(entity: &str, email: &str) -> CoreError {
    CoreError::Conflict(format!("A {entity} with email '{email}' already exists"))
}

#[async_trait]
impl VolunteerStore for InMemoryStore {
    async fn create_student(&self, input: NewStudent) -> StoreResult<Student> {
        let mut tables = self.tables.write().await;
        if let Some(email) = input.email.as_deref() {
            if tables
                .students
                .iter()
                .any(|s| same_email(s.email.as_deref(), email))
            {
                return Err(duplicate_email("student", email));
            }
        }

        let now = Utc::now();
        let student = Student {
            id: DbId::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            national_id: input.national_id,
            school_name: input.school_name,
            city: input.city,
            district: input.district,
            grade: input.grade,
            phone: input.phone,
            email: input.email,
            password_hash: input.password_hash,
            coordinator_teacher_name: input.coordinator_teacher_name,
            target_hours: input.target_hours.unwrap_or(DEFAULT_TARGET_HOURS),
            created_at: now,
            updated_at: now,
        };
        tables.students.push(student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: DbId) -> StoreResult<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .iter()
            .find(|s| same_email(s.email.as_deref(), email))
            .cloned())
    }

    async fn list_all_students(&self) -> StoreResult<Vec<Student>> {
        Ok(self.tables.read().await.students.clone())
    }

    async fn update_student(
        &self,
        id: DbId,
        patch: UpdateStudent,
    ) -> StoreResult<Option<Student>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = patch.email.as_deref() {
            if tables
                .students
                .iter()
                .any(|s| s.id != id && same_email(s.email.as_deref(), email))
            {
                return Err(duplicate_email("student", email));
            }
        }

        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        patch.apply_to(student);
        student.updated_at = Utc::now();
        Ok(Some(student.clone()))
    }

    async fn set_student_password(&self, id: DbId, password_hash: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.students.iter_mut().find(|s| s.id == id) {
            Some(student) => {
                student.password_hash = Some(password_hash.to_string());
                student.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_teacher(&self, input: NewTeacher) -> StoreResult<Teacher> {
        let mut tables = self.tables.write().await;
        if tables
            .teachers
            .iter()
            .any(|t| same_email(Some(t.email.as_str()), &input.email))
        {
            return Err(duplicate_email("teacher", &input.email));
        }

        let now = Utc::now();
        let teacher = Teacher {
            id: DbId::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password_hash,
            school_name: input.school_name,
            created_at: now,
            updated_at: now,
        };
        tables.teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn find_teacher_by_email(&self, email: &str) -> StoreResult<Option<Teacher>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teachers
            .iter()
            .find(|t| same_email(Some(t.email.as_str()), email))
            .cloned())
    }

    async fn count_teachers(&self) -> StoreResult<usize> {
        Ok(self.tables.read().await.teachers.len())
    }

    async fn create_admin(&self, input: NewHeadOfficeAdmin) -> StoreResult<HeadOfficeAdmin> {
        let mut tables = self.tables.write().await;
        if tables
            .admins
            .iter()
            .any(|a| same_email(Some(a.email.as_str()), &input.email))
        {
            return Err(duplicate_email("head-office admin", &input.email));
        }

        let now = Utc::now();
        let admin = HeadOfficeAdmin {
            id: DbId::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<HeadOfficeAdmin>> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .iter()
            .find(|a| same_email(Some(a.email.as_str()), email))
            .cloned())
    }

    async fn list_admins(&self) -> StoreResult<Vec<HeadOfficeAdmin>> {
        Ok(self.tables.read().await.admins.clone())
    }

    async fn create_activity(
        &self,
        student_id: DbId,
        input: NewActivity,
    ) -> StoreResult<ActivityRecord> {
        let mut tables = self.tables.write().await;
        if !tables.students.iter().any(|s| s.id == student_id) {
            return Err(CoreError::NotFound {
                entity: "student",
                id: student_id,
            });
        }

        let now = Utc::now();
        let activity = ActivityRecord {
            id: DbId::new_v4(),
            student_id,
            date: input.date,
            activity_type: input.activity_type,
            hours: input.hours,
            description: input.description,
            status: ActivityStatus::Pending,
            review_note: None,
            created_at: now,
            updated_at: now,
        };
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    async fn get_activity(&self, id: DbId) -> StoreResult<Option<ActivityRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.activities.iter().find(|a| a.id == id).cloned())
    }

    async fn list_activities_by_student(
        &self,
        student_id: DbId,
    ) -> StoreResult<Vec<ActivityRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .activities
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_all_activities(&self) -> StoreResult<Vec<ActivityRecord>> {
        Ok(self.tables.read().await.activities.clone())
    }

    async fn update_activity_status(
        &self,
        id: DbId,
        status: ActivityStatus,
        review_note: Option<String>,
    ) -> StoreResult<Option<StatusChange>> {
        let mut tables = self.tables.write().await;
        let Some(activity) = tables.activities.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        let previous = activity.status;
        activity.status = status;
        activity.review_note = review_note;
        activity.updated_at = Utc::now();

        Ok(Some(StatusChange {
            previous,
            activity: activity.clone(),
        }))
    }

    async fn create_activity_file(
        &self,
        activity_id: DbId,
        input: NewActivityFile,
    ) -> StoreResult<ActivityFile> {
        let mut tables = self.tables.write().await;
        if !tables.activities.iter().any(|a| a.id == activity_id) {
            return Err(CoreError::NotFound {
                entity: "activity",
                id: activity_id,
            });
        }

        let file = ActivityFile {
            id: DbId::new_v4(),
            activity_id,
            file_name: input.file_name,
            file_path: input.file_path,
            file_type: input.file_type,
            file_size: input.file_size,
            created_at: Utc::now(),
        };
        tables.files.push(file.clone());
        Ok(file)
    }

    async fn list_activity_files(&self, activity_id: DbId) -> StoreResult<Vec<ActivityFile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .files
            .iter()
            .filter(|f| f.activity_id == activity_id)
            .cloned()
            .collect())
    }

    async fn get_activity_file(&self, id: DbId) -> StoreResult<Option<ActivityFile>> {
        let tables = self.tables.read().await;
        Ok(tables.files.iter().find(|f| f.id == id).cloned())
    }

    async fn delete_activity_file(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.files.len();
        tables.files.retain(|f| f.id != id);
        Ok(tables.files.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn new_student(email: &str) -> NewStudent {
        NewStudent {
            first_name: "Deniz".into(),
            last_name: "Çelik".into(),
            school_name: Some("Atatürk Lisesi".into()),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    fn new_activity(hours: f64) -> NewActivity {
        NewActivity {
            date: NaiveDate::from_ymd_opt(2026, 4, 12).unwrap(),
            activity_type: "Kermes".into(),
            hours,
            description: "Okul kermesi".into(),
        }
    }

    #[tokio::test]
    async fn students_get_default_target() {
        let store = InMemoryStore::new();
        let student = store.create_student(new_student("d@example.com")).await.unwrap();
        assert_eq!(student.target_hours, DEFAULT_TARGET_HOURS);
        assert_eq!(store.student_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_student_email_conflicts() {
        let store = InMemoryStore::new();
        store.create_student(new_student("d@example.com")).await.unwrap();
        let err = store
            .create_student(new_student("D@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[tokio::test]
    async fn email_uniqueness_folds_non_ascii_case() {
        let store = InMemoryStore::new();
        store.create_student(new_student("ÇELIK@example.com")).await.unwrap();
        let err = store
            .create_student(new_student("çelik@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));

        let teacher = NewTeacher {
            first_name: "Şule".into(),
            last_name: "Öztürk".into(),
            email: "ŞULE@example.com".into(),
            password_hash: "hash".into(),
            school_name: None,
        };
        store.create_teacher(teacher.clone()).await.unwrap();
        let found = store.find_teacher_by_email("şule@example.com").await.unwrap();
        assert!(found.is_some());
        let err = store
            .create_teacher(NewTeacher {
                email: "şule@EXAMPLE.com".into(),
                ..teacher
            })
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[tokio::test]
    async fn activities_start_pending_and_can_be_redecided() {
        let store = InMemoryStore::new();
        let student = store.create_student(new_student("d@example.com")).await.unwrap();
        let activity = store
            .create_activity(student.id, new_activity(3.0))
            .await
            .unwrap();
        assert_eq!(activity.status, ActivityStatus::Pending);

        let change = store
            .update_activity_status(activity.id, ActivityStatus::Approved, Some("ok".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(change.previous, ActivityStatus::Pending);

        let change = store
            .update_activity_status(activity.id, ActivityStatus::Rejected, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(change.previous, ActivityStatus::Approved);
        assert_eq!(change.activity.status, ActivityStatus::Rejected);
        assert_eq!(change.activity.review_note, None);
    }

    #[tokio::test]
    async fn approved_listing_filters_statuses() {
        let store = InMemoryStore::new();
        let student = store.create_student(new_student("d@example.com")).await.unwrap();
        let a = store.create_activity(student.id, new_activity(2.0)).await.unwrap();
        store.create_activity(student.id, new_activity(5.0)).await.unwrap();
        store
            .update_activity_status(a.id, ActivityStatus::Approved, None)
            .await
            .unwrap();

        let approved = store.list_approved_activities(student.id).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);
    }

    #[tokio::test]
    async fn activity_for_unknown_student_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .create_activity(DbId::new_v4(), new_activity(1.0))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "student", .. });
    }

    #[tokio::test]
    async fn unknown_activity_status_update_is_none() {
        let store = InMemoryStore::new();
        let result = store
            .update_activity_status(DbId::new_v4(), ActivityStatus::Approved, None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn files_are_listed_per_activity_and_deleted() {
        let store = InMemoryStore::new();
        let student = store.create_student(new_student("d@example.com")).await.unwrap();
        let activity = store.create_activity(student.id, new_activity(1.0)).await.unwrap();
        let file = store
            .create_activity_file(
                activity.id,
                NewActivityFile {
                    file_name: "foto.png".into(),
                    file_path: "1-1-foto.png".into(),
                    file_type: "image/png".into(),
                    file_size: 512,
                },
            )
            .await
            .unwrap();

        assert_eq!(store.list_activity_files(activity.id).await.unwrap().len(), 1);
        assert!(store.delete_activity_file(file.id).await.unwrap());
        assert!(!store.delete_activity_file(file.id).await.unwrap());
        assert!(store.get_activity_file(file.id).await.unwrap().is_none());
    }
}
