//! Domain core of the İnci volunteering-hours backend.
//!
//! Contains the pure aggregation engines (per-student summaries, badge
//! tiers, cross-school rollups), the [`store::VolunteerStore`] abstraction
//! they read from, and the boundary validation rules. No database or HTTP
//! dependencies live here.

pub mod activity;
pub mod badge;
pub mod error;
pub mod people;
pub mod report;
pub mod review;
pub mod rollup;
pub mod service;
pub mod store;
pub mod summary;
pub mod types;
pub mod uploads;
pub mod validation;
