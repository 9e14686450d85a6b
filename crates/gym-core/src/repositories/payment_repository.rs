//! Payment repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewPayment, Payment};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_reference(&self, payment_reference: &str) -> Result<Option<Payment>, DomainError>;
    /// Insert the payment and set the member active in one transaction.
    /// Nothing is written if either statement fails.
    async fn create_and_activate(&self, payment: &NewPayment) -> Result<Payment, DomainError>;
    async fn list_for_member(&self, member_id: i64) -> Result<Vec<Payment>, DomainError>;
}
