//! Credential checks shared by the student, teacher and head-office logins.
//!
//! Login is stateless: a successful check returns the account and its role,
//! and no session or token is issued.

pub mod password;

use inci_core::error::CoreError;
use serde::Serialize;

/// The same message is used for unknown emails and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Body returned by every login and registration endpoint.
#[derive(Debug, Serialize)]
pub struct AuthenticatedUser<T: Serialize> {
    pub user: T,
    pub role: &'static str,
}

/// Verify a login attempt against an optional account lookup result.
///
/// Returns the account when the password matches, otherwise a uniform
/// `Unauthorized` error.
pub fn authenticate<T>(
    account: Option<T>,
    password: &str,
    stored_hash: impl Fn(&T) -> Option<&str>,
) -> Result<T, CoreError> {
    let Some(account) = account else {
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
    };
    if password::verify_password(password, stored_hash(&account))? {
        Ok(account)
    } else {
        Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
    }
}
