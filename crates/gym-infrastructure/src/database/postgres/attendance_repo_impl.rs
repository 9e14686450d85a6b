// ============================================================================
// Gym Infrastructure - PostgreSQL Attendance Repository
// File: crates/gym-infrastructure/src/database/postgres/attendance_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use gym_core::domain::{Attendance, AttendanceWithMember, NewAttendance};
use gym_core::error::DomainError;
use gym_core::repositories::AttendanceRepository;

use super::errors::{database_error, unique_violation, ATTENDANCE_DAY_KEY};

pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceRow {
    pub id: i64,
    pub member_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_in_date: NaiveDate,
    pub check_out_time: Option<DateTime<Utc>>,
}

impl From<AttendanceRow> for Attendance {
    fn from(row: AttendanceRow) -> Self {
        Attendance {
            id: row.id,
            member_id: row.member_id,
            check_in_time: row.check_in_time,
            check_in_date: row.check_in_date,
            check_out_time: row.check_out_time,
        }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceWithMemberRow {
    #[sqlx(flatten)]
    pub attendance: AttendanceRow,
    pub member_code: String,
    pub member_name: String,
    pub member_phone: String,
}

impl From<AttendanceWithMemberRow> for AttendanceWithMember {
    fn from(row: AttendanceWithMemberRow) -> Self {
        AttendanceWithMember {
            attendance: row.attendance.into(),
            member_code: row.member_code,
            member_name: row.member_name,
            member_phone: row.member_phone,
        }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    async fn find_for_day(&self, member_id: i64, date: NaiveDate) -> Result<Option<Attendance>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, check_in_time, check_in_date, check_out_time
            FROM attendances
            WHERE member_id = $1 AND check_in_date = $2
            "#,
        )
        .bind(member_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding attendance for day", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, attendance: &NewAttendance) -> Result<Attendance, DomainError> {
        let row: AttendanceRow = sqlx::query_as(
            r#"
            INSERT INTO attendances (member_id, check_in_time, check_in_date)
            VALUES ($1, $2, $3)
            RETURNING id, member_id, check_in_time, check_in_date, check_out_time
            "#,
        )
        .bind(attendance.member_id)
        .bind(attendance.check_in_time)
        .bind(attendance.check_in_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some(ATTENDANCE_DAY_KEY) => DomainError::DuplicateAttendance,
            _ => database_error("creating attendance", e),
        })?;

        info!("Attendance {} stored for member id {}", row.id, row.member_id);
        Ok(row.into())
    }

    async fn list_for_day(&self, date: NaiveDate) -> Result<Vec<AttendanceWithMember>, DomainError> {
        let rows: Vec<AttendanceWithMemberRow> = sqlx::query_as(
            r#"
            SELECT
                a.id, a.member_id, a.check_in_time, a.check_in_date, a.check_out_time,
                m.member_code, m.name AS member_name, m.phone AS member_phone
            FROM attendances a
            JOIN members m ON m.id = a.member_id
            WHERE a.check_in_date = $1
            ORDER BY a.check_in_time DESC, a.id DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing attendance for day", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AttendanceWithMember>, DomainError> {
        let rows: Vec<AttendanceWithMemberRow> = sqlx::query_as(
            r#"
            SELECT
                a.id, a.member_id, a.check_in_time, a.check_in_date, a.check_out_time,
                m.member_code, m.name AS member_name, m.phone AS member_phone
            FROM attendances a
            JOIN members m ON m.id = a.member_id
            ORDER BY a.check_in_time DESC, a.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing recent attendance", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_member(&self, member_id: i64) -> Result<Vec<Attendance>, DomainError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, check_in_time, check_in_date, check_out_time
            FROM attendances
            WHERE member_id = $1
            ORDER BY check_in_time DESC, id DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing member attendance", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
