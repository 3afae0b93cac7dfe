//! Input validation applied at the boundary before any core logic runs.

use chrono::NaiveDate;

use crate::activity::ActivityStatus;
use crate::error::CoreError;
use crate::people::{ROLE_STUDENT, ROLE_TEACHER};

/// Roles accepted by `/auth/login` and `/auth/register`.
pub const AUTH_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_TEACHER];

/// Minimum accepted password length on change-password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Return the trimmed value, or a validation error naming `field`.
pub fn require_non_empty<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("'{field}' is required"))),
    }
}

/// Check that all named fields are present, reporting every missing one.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| v.map_or(true, |s| s.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Parse an ISO `YYYY-MM-DD` activity date.
pub fn parse_activity_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid date '{value}'. Expected format YYYY-MM-DD"
        ))
    })
}

/// Parse a submitted review status.
pub fn parse_status(value: Option<&str>) -> Result<ActivityStatus, CoreError> {
    let value = require_non_empty(value, "status")?;
    ActivityStatus::from_str_value(value).map_err(CoreError::Validation)
}

/// Validate a login / registration role.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if AUTH_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            AUTH_ROLES.join(", ")
        )))
    }
}

/// Validate a personal volunteering goal.
pub fn validate_target_hours(target: i32) -> Result<(), CoreError> {
    if target > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "'targetHours' must be a positive number".into(),
        ))
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
