//! Handlers for the `/reports` resource: dashboards and rankings.
//!
//! Every endpoint recomputes from the current store contents.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use inci_core::report::StudentReport;
use inci_core::rollup::{
    ActivityTypeStatistics, CityStatistics, MonthlyStatistics, OverallStatistics,
    SchoolAggregate, TopStudent,
};
use inci_core::service;
use inci_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::{LimitParams, YearParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/reports/overview
pub async fn overview(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<OverallStatistics>>> {
    let stats = service::overall_statistics(state.store()).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/reports/by-city
pub async fn by_city(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CityStatistics>>>> {
    let stats = service::statistics_by_city(state.store()).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/reports/by-activity-type
pub async fn by_activity_type(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ActivityTypeStatistics>>>> {
    let stats = service::activity_type_stats(state.store()).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/reports/monthly?year=
///
/// Defaults to the current year. Months without activities are omitted.
pub async fn monthly(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<DataResponse<Vec<MonthlyStatistics>>>> {
    let year = params.resolve(Utc::now().date_naive());
    let stats = service::monthly_stats(state.store(), year).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/reports/schools
pub async fn schools(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SchoolAggregate>>>> {
    let schools = service::aggregate_by_school(state.store()).await?;
    Ok(Json(DataResponse { data: schools }))
}

/// GET /api/reports/top-students?limit=
pub async fn top_students(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<TopStudent>>>> {
    let students = service::top_students(state.store(), params.resolve()).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/reports/top-schools?limit=
pub async fn top_schools(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<SchoolAggregate>>>> {
    let schools = service::top_schools(state.store(), params.resolve()).await?;
    Ok(Json(DataResponse { data: schools }))
}

/// GET /api/reports/student-report/{id}
pub async fn student_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudentReport>>> {
    let report = service::generate_student_report(state.store(), id, Utc::now())
        .await?
        .ok_or_else(|| AppError::not_found("student", id))?;
    Ok(Json(DataResponse { data: report }))
}
