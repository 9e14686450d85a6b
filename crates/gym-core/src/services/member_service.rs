//! Member registration, lookup and soft deletion

use std::sync::Arc;

use tracing::{info, warn};

use gym_shared::utils::mask_phone;

use crate::domain::{format_member_code, Member, MemberFilter, MemberSummary, NewMember};
use crate::error::DomainError;
use crate::repositories::MemberRepository;
use crate::time::Clock;

/// How member codes are rendered from the storage sequence.
#[derive(Debug, Clone)]
pub struct MemberCodeFormat {
    pub prefix: String,
    pub width: usize,
}

pub struct MemberService {
    member_repo: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
    code_format: MemberCodeFormat,
}

impl MemberService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        clock: Arc<dyn Clock>,
        code_format: MemberCodeFormat,
    ) -> Self {
        Self {
            member_repo,
            clock,
            code_format,
        }
    }

    /// Register a member. The phone must not belong to another live member;
    /// the code number comes from the storage sequence, so concurrent
    /// registrations never share a code.
    pub async fn create_member(&self, member: NewMember) -> Result<Member, DomainError> {
        if self.member_repo.find_by_phone(&member.phone).await?.is_some() {
            warn!("Member registration rejected: phone {} already registered", mask_phone(&member.phone));
            return Err(DomainError::PhoneAlreadyRegistered);
        }

        let sequence = self.member_repo.next_code_sequence().await?;
        let member_code = format_member_code(&self.code_format.prefix, sequence, self.code_format.width);

        let created = self.member_repo.create(&member, &member_code).await?;
        info!("Member registered: {} ({})", created.member_code, created.membership_type.as_str());
        Ok(created)
    }

    pub async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError> {
        self.member_repo.list(filter).await
    }

    pub async fn find_by_code(&self, member_code: &str) -> Result<Member, DomainError> {
        self.member_repo
            .find_by_code(member_code.trim())
            .await?
            .ok_or(DomainError::MemberNotFound)
    }

    pub async fn verify_by_code(&self, member_code: &str) -> Result<MemberSummary, DomainError> {
        Ok(self.find_by_code(member_code).await?.summary())
    }

    pub async fn verify_by_name_and_phone(&self, name: &str, phone: &str) -> Result<MemberSummary, DomainError> {
        self.member_repo
            .find_by_name_and_phone(name.trim(), phone.trim())
            .await?
            .map(|m| m.summary())
            .ok_or(DomainError::MemberNotFound)
    }

    /// Soft-delete. The code stays allocated forever; the phone is freed.
    pub async fn remove_member(&self, member_code: &str) -> Result<(), DomainError> {
        let member = self.find_by_code(member_code).await?;
        self.member_repo.soft_delete(member.id, self.clock.now()).await?;
        info!("Member removed: {}", member.member_code);
        Ok(())
    }
}
