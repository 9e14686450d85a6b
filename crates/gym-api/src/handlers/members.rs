// ============================================================================
// Gym API - Member Handlers
// File: crates/gym-api/src/handlers/members.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use gym_core::domain::{MemberSummary, NewMember};
use gym_core::error::DomainError;

use crate::dto::{CreateMemberRequest, MemberListQuery, MemberResponse, MessageResponse, PhoneQuery};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, AuthAdmin};
use crate::state::AppState;

/// POST /members/
pub async fn create_member(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    ApiJson(payload): ApiJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let new_member = NewMember::new(payload.name, payload.phone, payload.membership_type)
        .map_err(DomainError::from)?;

    let member = state.members.create_member(new_member).await?;
    tracing::info!("Member {} created by {}", member.member_code, admin.username);
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// GET /members/?active=
pub async fn list_members(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    ApiQuery(query): ApiQuery<MemberListQuery>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = state.members.list_members(&query.into()).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// DELETE /members/{member_code}
pub async fn remove_member(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(member_code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.members.remove_member(&member_code).await?;
    tracing::info!("Member {} removed by {}", member_code, admin.username);
    Ok(Json(MessageResponse::new("Member removed")))
}

/// GET /members/verify_by_id/{member_code}
pub async fn verify_by_code(
    State(state): State<AppState>,
    Path(member_code): Path<String>,
) -> Result<Json<MemberSummary>, ApiError> {
    Ok(Json(state.members.verify_by_code(&member_code).await?))
}

/// GET /members/verify/{name}?phone=
pub async fn verify_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiQuery(query): ApiQuery<PhoneQuery>,
) -> Result<Json<MemberSummary>, ApiError> {
    Ok(Json(state.members.verify_by_name_and_phone(&name, &query.phone).await?))
}
