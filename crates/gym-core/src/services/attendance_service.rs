// ============================================================================
// Gym Core - Attendance Service
// File: crates/gym-core/src/services/attendance_service.rs
// ============================================================================
//! The attendance gate: admits or rejects a check-in attempt.

use std::sync::Arc;

use tracing::{info, warn};

use gym_shared::utils::mask_phone;

use crate::domain::{Attendance, Member, NewAttendance};
use crate::error::DomainError;
use crate::repositories::{AttendanceRepository, MemberRepository};
use crate::time::{self, Clock};

pub struct AttendanceService {
    member_repo: Arc<dyn MemberRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
}

impl AttendanceService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            member_repo,
            attendance_repo,
            clock,
        }
    }

    /// Public check-in with member code and phone. The code only locates
    /// the member; the phone must match the stored one. A mismatch looks
    /// exactly like an unknown code.
    pub async fn mark_by_code(&self, member_code: &str, phone: &str) -> Result<Attendance, DomainError> {
        let member = self
            .member_repo
            .find_by_code(member_code.trim())
            .await?
            .filter(|m| m.phone_matches(phone))
            .ok_or_else(|| {
                warn!("Check-in rejected: no member {} with the given phone", member_code);
                DomainError::MemberNotFound
            })?;

        self.admit(&member).await
    }

    /// Public check-in with name and phone. The exact match on both is the
    /// authentication.
    pub async fn mark_by_name(&self, name: &str, phone: &str) -> Result<Attendance, DomainError> {
        let member = self
            .member_repo
            .find_by_name_and_phone(name.trim(), phone.trim())
            .await?
            .ok_or_else(|| {
                warn!("Check-in rejected: no member matching name and phone {}", mask_phone(phone));
                DomainError::MemberNotFound
            })?;

        self.admit(&member).await
    }

    /// Check-in recorded by an authenticated admin on the member's behalf.
    pub async fn mark_for_member(&self, member_code: &str) -> Result<Attendance, DomainError> {
        let member = self
            .member_repo
            .find_by_code(member_code.trim())
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        self.admit(&member).await
    }

    async fn admit(&self, member: &Member) -> Result<Attendance, DomainError> {
        if !member.is_active() {
            warn!("Check-in rejected: membership inactive for {}", member.member_code);
            return Err(DomainError::MembershipInactive);
        }

        let now = self.clock.now();
        let today = time::local_date(&now);

        if let Some(existing) = self.attendance_repo.find_for_day(member.id, today).await? {
            return Err(self.already_marked(member, &existing));
        }

        match self.attendance_repo.create(&NewAttendance::at(member.id, now)).await {
            Ok(attendance) => {
                info!(
                    "Attendance marked for {} at {}",
                    member.member_code,
                    attendance.check_in_local()
                );
                Ok(attendance)
            }
            // Lost a race with a concurrent check-in; report the row that won.
            Err(DomainError::DuplicateAttendance) => {
                let existing = self
                    .attendance_repo
                    .find_for_day(member.id, today)
                    .await?
                    .ok_or(DomainError::DuplicateAttendance)?;
                Err(self.already_marked(member, &existing))
            }
            Err(e) => Err(e),
        }
    }

    fn already_marked(&self, member: &Member, existing: &Attendance) -> DomainError {
        let check_in = existing.check_in_local();
        warn!("Check-in rejected: {} already checked in at {}", member.member_code, check_in);
        DomainError::AttendanceAlreadyMarked { check_in }
    }
}
