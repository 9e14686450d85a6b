//! Attendance repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Attendance, AttendanceWithMember, NewAttendance};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_for_day(&self, member_id: i64, date: NaiveDate) -> Result<Option<Attendance>, DomainError>;
    /// Fails with `DuplicateAttendance` when the member already has a row
    /// for `check_in_date`.
    async fn create(&self, attendance: &NewAttendance) -> Result<Attendance, DomainError>;
    async fn list_for_day(&self, date: NaiveDate) -> Result<Vec<AttendanceWithMember>, DomainError>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<AttendanceWithMember>, DomainError>;
    async fn list_for_member(&self, member_id: i64) -> Result<Vec<Attendance>, DomainError>;
}
