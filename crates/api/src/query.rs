//! Shared query parameter types for API handlers.

use chrono::{Datelike, NaiveDate};
use inci_core::review::PendingFilter;
use inci_core::service::DEFAULT_RANKING_LIMIT;
use serde::Deserialize;

/// `?limit=` for the top-N rankings.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    /// The requested limit, or the default when absent, zero or negative.
    pub fn resolve(&self) -> usize {
        match self.limit {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(DEFAULT_RANKING_LIMIT),
            _ => DEFAULT_RANKING_LIMIT,
        }
    }
}

/// `?year=` for the monthly statistics.
#[derive(Debug, Default, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}

impl YearParams {
    pub fn resolve(&self, today: NaiveDate) -> i32 {
        self.year.unwrap_or_else(|| today.year())
    }
}

/// `?teacherName=&schoolName=` filters for the pending review queue.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingParams {
    pub teacher_name: Option<String>,
    pub school_name: Option<String>,
}

impl From<PendingParams> for PendingFilter {
    fn from(params: PendingParams) -> Self {
        PendingFilter {
            teacher_name: params.teacher_name,
            school_name: params.school_name,
        }
    }
}
