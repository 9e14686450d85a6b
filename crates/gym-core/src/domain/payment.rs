// ============================================================================
// Gym Core - Payment Entity
// File: crates/gym-core/src/domain/payment.rs
// Description: Immutable membership payment; recording one activates the member
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Payment entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub member_id: i64,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,
    pub payment_reference: String,
}

/// A payment about to be written
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewPayment {
    pub member_id: i64,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    pub payment_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,

    #[validate(length(min = 1, max = 64, message = "Payment reference must be between 1 and 64 characters"))]
    pub payment_reference: String,
}

/// Amounts are stored as `NUMERIC(12, 2)`.
const AMOUNT_SCALE: u32 = 2;
const AMOUNT_LIMIT: i64 = 10_000_000_000;

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if !amount.is_sign_positive() || amount.is_zero() {
        return Err(ValidationError::new("amount").with_message("Amount must be positive".into()));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::new("amount").with_message("Amount cannot have more than 2 decimal places".into()));
    }
    if *amount >= Decimal::from(AMOUNT_LIMIT) {
        return Err(ValidationError::new("amount").with_message("Amount is too large".into()));
    }
    Ok(())
}

/// What an admin submits when recording a payment
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub member_code: String,
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    pub next_due_date: DateTime<Utc>,
    pub payment_reference: String,
}
