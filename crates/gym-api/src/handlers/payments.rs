// ============================================================================
// Gym API - Payment Handlers
// File: crates/gym-api/src/handlers/payments.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{CreatePaymentRequest, PaymentResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthAdmin};
use crate::state::AppState;

/// POST /payments/
pub async fn create_payment(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    ApiJson(payload): ApiJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let member_code = payload.member_code.trim().to_string();
    let payment = state.payments.create_payment(payload.into()).await?;
    tracing::info!("Payment {} recorded by {}", payment.payment_reference, admin.username);
    Ok((StatusCode::CREATED, Json(PaymentResponse::new(payment, &member_code))))
}

/// GET /admin/payments/{member_code}
pub async fn payment_history(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(member_code): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let member_code = member_code.trim();
    let payments = state.payments.payment_history(member_code).await?;
    Ok(Json(
        payments
            .into_iter()
            .map(|p| PaymentResponse::new(p, member_code))
            .collect(),
    ))
}
