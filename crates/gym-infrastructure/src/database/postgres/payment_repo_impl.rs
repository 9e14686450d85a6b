// ============================================================================
// Gym Infrastructure - PostgreSQL Payment Repository
// File: crates/gym-infrastructure/src/database/postgres/payment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};

use gym_core::domain::{NewPayment, Payment};
use gym_core::error::DomainError;
use gym_core::repositories::PaymentRepository;

use super::errors::{database_error, unique_violation, PAYMENT_REFERENCE_KEY};

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PaymentRow {
    pub id: i64,
    pub member_id: i64,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,
    pub payment_reference: String,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            member_id: row.member_id,
            amount: row.amount,
            payment_date: row.payment_date,
            next_due_date: row.next_due_date,
            payment_reference: row.payment_reference,
        }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_by_reference(&self, payment_reference: &str) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, amount, payment_date, next_due_date, payment_reference
            FROM payments
            WHERE payment_reference = $1
            "#,
        )
        .bind(payment_reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding payment by reference", e))?;

        Ok(row.map(Into::into))
    }

    async fn create_and_activate(&self, payment: &NewPayment) -> Result<Payment, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting payment transaction", e))?;

        let row: PaymentRow = sqlx::query_as(
            r#"
            INSERT INTO payments (member_id, amount, payment_date, next_due_date, payment_reference)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, member_id, amount, payment_date, next_due_date, payment_reference
            "#,
        )
        .bind(payment.member_id)
        .bind(payment.amount)
        .bind(payment.payment_date)
        .bind(payment.next_due_date)
        .bind(&payment.payment_reference)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some(PAYMENT_REFERENCE_KEY) => DomainError::PaymentReferenceExists(payment.payment_reference.clone()),
            _ => database_error("creating payment", e),
        })?;

        let activated = sqlx::query(
            r#"
            UPDATE members
            SET membership_status = TRUE, updated_at = NOW()
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(payment.member_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("activating member", e))?;

        // Member removed between lookup and insert; dropping `tx` rolls back.
        if activated.rows_affected() == 0 {
            warn!("Payment {} aborted: member id {} no longer exists", payment.payment_reference, payment.member_id);
            return Err(DomainError::MemberNotFound);
        }

        tx.commit()
            .await
            .map_err(|e| database_error("committing payment", e))?;

        info!("Payment {} stored for member id {}", row.payment_reference, row.member_id);
        Ok(row.into())
    }

    async fn list_for_member(&self, member_id: i64) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, amount, payment_date, next_due_date, payment_reference
            FROM payments
            WHERE member_id = $1
            ORDER BY payment_date DESC, id DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing member payments", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
