// ============================================================================
// Gym API - Attendance Handlers
// File: crates/gym-api/src/handlers/attendance.rs
// ============================================================================
//! Public check-in and dashboards, plus admin check-in and history

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{AttendanceEntryResponse, AttendanceResponse, MarkAttendanceQuery, RecentQuery};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthAdmin};
use crate::state::AppState;

/// POST /attendance/mark?member_code=&phone= or ?name=&phone=
pub async fn mark(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MarkAttendanceQuery>,
) -> Result<(StatusCode, Json<AttendanceResponse>), ApiError> {
    let member_code = query.member_code.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let name = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty());

    let attendance = match (member_code, name) {
        (Some(code), _) => state.attendance.mark_by_code(code, &query.phone).await?,
        (None, Some(name)) => state.attendance.mark_by_name(name, &query.phone).await?,
        (None, None) => {
            return Err(ApiError::Validation("Either member_code or name is required".to_string()));
        }
    };

    Ok((StatusCode::CREATED, Json(attendance.into())))
}

/// GET /attendance/today
pub async fn today(State(state): State<AppState>) -> Result<Json<Vec<AttendanceEntryResponse>>, ApiError> {
    let rows = state.reports.today_attendance().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /attendance/recent?limit=
pub async fn recent(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecentQuery>,
) -> Result<Json<Vec<AttendanceEntryResponse>>, ApiError> {
    let rows = state.reports.recent_attendance(query.limit).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /admin/attendance/{member_code}
pub async fn admin_mark(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(member_code): Path<String>,
) -> Result<(StatusCode, Json<AttendanceResponse>), ApiError> {
    let attendance = state.attendance.mark_for_member(&member_code).await?;
    tracing::info!("Attendance for {} recorded by {}", member_code, admin.username);
    Ok((StatusCode::CREATED, Json(attendance.into())))
}

/// GET /admin/attendance/{member_code}
pub async fn member_history(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(member_code): Path<String>,
) -> Result<Json<Vec<AttendanceResponse>>, ApiError> {
    let rows = state.reports.member_history(&member_code).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
