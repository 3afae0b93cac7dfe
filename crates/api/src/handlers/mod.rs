pub mod activities;
pub mod auth;
pub mod files;
pub mod headoffice;
pub mod profile;
pub mod reports;
pub mod students;
