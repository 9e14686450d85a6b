//! Request extractors

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use gym_core::domain::Admin;
use gym_core::error::DomainError;
use gym_security::JwtService;

use crate::error::ApiError;
use crate::state::AppState;

/// The admin behind a valid `Authorization: Bearer` header. Any missing,
/// malformed, expired or orphaned token is the same 401.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Admin);

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(JwtService::extract_from_header)
            .ok_or_else(|| {
                warn!("Missing or malformed bearer token on {}", parts.uri.path());
                ApiError::from(DomainError::InvalidToken)
            })?;

        let admin = state.auth.authenticate(token).await?;
        Ok(AuthAdmin(admin))
    }
}

/// `Json` whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Form` whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct ApiForm<T>(pub T);

/// `Query` whose rejections render as [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
