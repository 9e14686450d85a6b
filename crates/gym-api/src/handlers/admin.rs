// ============================================================================
// Gym API - Admin Handlers
// File: crates/gym-api/src/handlers/admin.rs
// ============================================================================
//! Admin account handlers (register, login, me)

use axum::{extract::State, http::StatusCode, Json};

use gym_core::services::LoginResult;

use crate::dto::{AdminResponse, LoginForm, RegisterAdminRequest};
use crate::error::ApiError;
use crate::extractors::{ApiForm, ApiJson, AuthAdmin};
use crate::state::AppState;

/// Register handler - POST /admin/register (existing admins only)
pub async fn register(
    State(state): State<AppState>,
    AuthAdmin(registrar): AuthAdmin,
    ApiJson(payload): ApiJson<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<AdminResponse>), ApiError> {
    let admin = state.auth.register_admin(&payload.username, &payload.password).await?;
    tracing::info!("Admin {} registered by {}", admin.username, registrar.username);
    Ok((StatusCode::CREATED, Json(admin.into())))
}

/// Login handler - POST /admin/login (form-encoded)
pub async fn login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state.auth.login(&form.username, &form.password).await?;
    Ok(Json(result))
}

/// Current admin - GET /admin/me
pub async fn me(AuthAdmin(admin): AuthAdmin) -> Json<AdminResponse> {
    Json(admin.into())
}
