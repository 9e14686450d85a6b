//! Member repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Member, MemberFilter, NewMember};
use crate::error::DomainError;

/// Lookups only ever return members that have not been soft-deleted.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_code(&self, member_code: &str) -> Result<Option<Member>, DomainError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Member>, DomainError>;
    async fn find_by_name_and_phone(&self, name: &str, phone: &str) -> Result<Option<Member>, DomainError>;
    async fn list(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError>;
    /// Allocate the next member code number from the storage sequence.
    async fn next_code_sequence(&self) -> Result<i64, DomainError>;
    /// Fails with `PhoneAlreadyRegistered` or `MemberCodeExists` when a
    /// uniqueness constraint rejects the row.
    async fn create(&self, member: &NewMember, member_code: &str) -> Result<Member, DomainError>;
    async fn soft_delete(&self, id: i64, removed_at: DateTime<Utc>) -> Result<(), DomainError>;
}
