// ============================================================================
// Gym Core - Attendance Entity
// File: crates/gym-core/src/domain/attendance.rs
// Description: One check-in per member per Nepal calendar day
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::time;

/// Attendance entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub member_id: i64,
    pub check_in_time: DateTime<Utc>,
    /// Nepal local date of `check_in_time`; unique per member.
    pub check_in_date: NaiveDate,
    pub check_out_time: Option<DateTime<Utc>>,
}

impl Attendance {
    pub fn check_in_local(&self) -> String {
        time::format_clock(&self.check_in_time)
    }
}

/// A check-in about to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub member_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_in_date: NaiveDate,
}

impl NewAttendance {
    pub fn at(member_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            member_id,
            check_in_time: now,
            check_in_date: time::local_date(&now),
        }
    }
}

/// Attendance joined with the identity of the member who checked in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceWithMember {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub member_code: String,
    pub member_name: String,
    pub member_phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_attendance_uses_local_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap();
        let attendance = NewAttendance::at(7, now);
        assert_eq!(attendance.check_in_time, now);
        assert_eq!(attendance.check_in_date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }
}
