//! Admin repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Admin, NewAdmin};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError>;
    async fn create(&self, admin: &NewAdmin) -> Result<Admin, DomainError>;
    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError>;
}
