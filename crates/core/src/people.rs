//! Students, teachers and head-office admins.
//!
//! Password hashes live on the entity structs so stores can verify logins,
//! but they are never serialized.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Volunteering goal assigned to a student when none is given.
pub const DEFAULT_TARGET_HOURS: i32 = 40;

/// Role names accepted by the login and registration endpoints.
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_HEADOFFICE: &str = "headoffice";

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub grade: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub coordinator_teacher_name: Option<String>,
    pub target_hours: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Student {
    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// School name, if present and non-blank.
    pub fn school(&self) -> Option<&str> {
        non_blank(self.school_name.as_deref())
    }

    /// City, if present and non-blank.
    pub fn city(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }
}

/// Input for creating a student. `password_hash` is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub grade: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub coordinator_teacher_name: Option<String>,
    pub target_hours: Option<i32>,
}

/// Profile patch. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub grade: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub coordinator_teacher_name: Option<String>,
    pub target_hours: Option<i32>,
}

impl UpdateStudent {
    /// Apply the patch to a student in place.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(v) = &self.first_name {
            student.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            student.last_name = v.clone();
        }
        if let Some(v) = &self.national_id {
            student.national_id = Some(v.clone());
        }
        if let Some(v) = &self.school_name {
            student.school_name = Some(v.clone());
        }
        if let Some(v) = &self.city {
            student.city = Some(v.clone());
        }
        if let Some(v) = &self.district {
            student.district = Some(v.clone());
        }
        if let Some(v) = &self.grade {
            student.grade = Some(v.clone());
        }
        if let Some(v) = &self.phone {
            student.phone = Some(v.clone());
        }
        if let Some(v) = &self.email {
            student.email = Some(v.clone());
        }
        if let Some(v) = &self.coordinator_teacher_name {
            student.coordinator_teacher_name = Some(v.clone());
        }
        if let Some(v) = self.target_hours {
            student.target_hours = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub school_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub school_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Head-office admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadOfficeAdmin {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewHeadOfficeAdmin {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student() -> Student {
        let now = Utc::now();
        Student {
            id: DbId::new_v4(),
            first_name: "Ayşe".into(),
            last_name: "Yılmaz".into(),
            national_id: None,
            school_name: Some("  ".into()),
            city: Some("Ankara".into()),
            district: None,
            grade: None,
            phone: None,
            email: Some("ayse@example.com".into()),
            password_hash: Some("$argon2id$secret".into()),
            coordinator_teacher_name: None,
            target_hours: DEFAULT_TARGET_HOURS,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn full_name_joins_with_space() {
        assert_eq!(student().full_name(), "Ayşe Yılmaz");
    }

    #[test]
    fn blank_school_is_treated_as_missing() {
        let s = student();
        assert_eq!(s.school(), None);
        assert_eq!(s.city(), Some("Ankara"));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_value(student()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["firstName"], "Ayşe");
        assert_eq!(json["targetHours"], 40);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut s = student();
        let patch = UpdateStudent {
            city: Some("İzmir".into()),
            target_hours: Some(60),
            ..Default::default()
        };
        patch.apply_to(&mut s);
        assert_eq!(s.city.as_deref(), Some("İzmir"));
        assert_eq!(s.target_hours, 60);
        assert_eq!(s.first_name, "Ayşe");
    }
}
