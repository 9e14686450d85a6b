//! Membership ledger: recording a payment is what activates a member.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewPayment, Payment, PaymentRequest};
use crate::error::DomainError;
use crate::repositories::{MemberRepository, PaymentRepository};
use crate::time::Clock;

pub struct PaymentService {
    member_repo: Arc<dyn MemberRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    clock: Arc<dyn Clock>,
}

impl PaymentService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            member_repo,
            payment_repo,
            clock,
        }
    }

    /// Record a payment for an active member and (re)affirm their status.
    /// The reference is checked first so a replayed request reports the
    /// duplicate rather than the member's state.
    pub async fn create_payment(&self, request: PaymentRequest) -> Result<Payment, DomainError> {
        let payment_reference = request.payment_reference.trim().to_string();

        if self
            .payment_repo
            .find_by_reference(&payment_reference)
            .await?
            .is_some()
        {
            warn!("Payment rejected: reference {} already recorded", payment_reference);
            return Err(DomainError::PaymentReferenceExists(payment_reference));
        }

        let member = self
            .member_repo
            .find_by_code(request.member_code.trim())
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        if !member.is_active() {
            warn!("Payment rejected: membership inactive for {}", member.member_code);
            return Err(DomainError::MembershipInactive);
        }

        let payment = NewPayment {
            member_id: member.id,
            amount: request.amount,
            payment_date: request.payment_date.unwrap_or_else(|| self.clock.now()),
            next_due_date: request.next_due_date,
            payment_reference,
        };
        payment.validate()?;

        let created = self.payment_repo.create_and_activate(&payment).await?;
        info!(
            "Payment {} of {} recorded for {}",
            created.payment_reference, created.amount, member.member_code
        );
        Ok(created)
    }

    /// Payments for one member, newest first.
    pub async fn payment_history(&self, member_code: &str) -> Result<Vec<Payment>, DomainError> {
        let member = self
            .member_repo
            .find_by_code(member_code.trim())
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        self.payment_repo.list_for_member(member.id).await
    }
}
