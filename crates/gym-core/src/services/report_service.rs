//! Read-only attendance reports

use std::sync::Arc;

use tracing::debug;

use gym_shared::constants::MAX_RECENT_ATTENDANCE_LIMIT;

use crate::domain::{Attendance, AttendanceWithMember};
use crate::error::DomainError;
use crate::repositories::{AttendanceRepository, MemberRepository};
use crate::time::{self, Clock};

pub struct ReportService {
    member_repo: Arc<dyn MemberRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
    default_recent_limit: i64,
}

impl ReportService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        clock: Arc<dyn Clock>,
        default_recent_limit: i64,
    ) -> Self {
        Self {
            member_repo,
            attendance_repo,
            clock,
            default_recent_limit,
        }
    }

    /// Check-ins on the current Nepal calendar day.
    pub async fn today_attendance(&self) -> Result<Vec<AttendanceWithMember>, DomainError> {
        let today = time::today(self.clock.as_ref());
        debug!("Listing attendance for {}", today);
        self.attendance_repo.list_for_day(today).await
    }

    /// Most recent check-ins, newest first. The limit is clamped to
    /// `1..=MAX_RECENT_ATTENDANCE_LIMIT`.
    pub async fn recent_attendance(&self, limit: Option<i64>) -> Result<Vec<AttendanceWithMember>, DomainError> {
        let limit = limit
            .unwrap_or(self.default_recent_limit)
            .clamp(1, MAX_RECENT_ATTENDANCE_LIMIT);
        self.attendance_repo.list_recent(limit).await
    }

    /// Attendance history of one member, newest first.
    pub async fn member_history(&self, member_code: &str) -> Result<Vec<Attendance>, DomainError> {
        let member = self
            .member_repo
            .find_by_code(member_code.trim())
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        self.attendance_repo.list_for_member(member.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::repositories::{MockAttendanceRepository, MockMemberRepository};
    use crate::time::FixedClock;

    fn service(members: MockMemberRepository, attendance: MockAttendanceRepository) -> ReportService {
        // 23:00 on 30 April in UTC, already 1 May in Kathmandu
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 4, 30, 23, 0, 0).unwrap());
        ReportService::new(Arc::new(members), Arc::new(attendance), Arc::new(clock), 10)
    }

    #[tokio::test]
    async fn test_today_uses_nepal_date() {
        let mut attendance = MockAttendanceRepository::new();
        attendance
            .expect_list_for_day()
            .withf(|date| *date == NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .times(1)
            .returning(|_| Ok(vec![]));

        let rows = service(MockMemberRepository::new(), attendance)
            .today_attendance()
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_recent_limit_defaults_and_clamps() {
        let mut attendance = MockAttendanceRepository::new();
        attendance.expect_list_recent().withf(|l| *l == 10).times(1).returning(|_| Ok(vec![]));
        attendance.expect_list_recent().withf(|l| *l == 100).times(1).returning(|_| Ok(vec![]));
        attendance.expect_list_recent().withf(|l| *l == 1).times(1).returning(|_| Ok(vec![]));

        let svc = service(MockMemberRepository::new(), attendance);
        svc.recent_attendance(None).await.unwrap();
        svc.recent_attendance(Some(5000)).await.unwrap();
        svc.recent_attendance(Some(0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_history_for_unknown_member() {
        let mut members = MockMemberRepository::new();
        members.expect_find_by_code().returning(|_| Ok(None));
        let mut attendance = MockAttendanceRepository::new();
        attendance.expect_list_for_member().never();

        let err = service(members, attendance).member_history("TDFC404").await.unwrap_err();

        assert!(matches!(err, DomainError::MemberNotFound));
    }
}
