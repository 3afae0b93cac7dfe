//! Row types mapped from database tables.
//!
//! Each row converts into the matching `inci-core` domain type; rows never
//! leave this crate through the store interface.

pub mod activity;
pub mod activity_file;
pub mod admin;
pub mod student;
pub mod teacher;
