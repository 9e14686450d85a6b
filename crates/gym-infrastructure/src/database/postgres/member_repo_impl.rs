// ============================================================================
// Gym Infrastructure - PostgreSQL Member Repository
// File: crates/gym-infrastructure/src/database/postgres/member_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use gym_core::domain::{Member, MemberFilter, MembershipType, NewMember};
use gym_core::error::DomainError;
use gym_core::repositories::MemberRepository;

use super::errors::{database_error, unique_violation, MEMBER_CODE_KEY, MEMBER_PHONE_KEY};

pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MemberRow {
    pub id: i64,
    pub member_code: String,
    pub name: String,
    pub phone: String,
    pub membership_type: String,
    pub membership_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let membership_type: MembershipType = row.membership_type.parse().map_err(|_| {
            error!("Member {} has unknown membership type {}", row.member_code, row.membership_type);
            DomainError::DatabaseError(format!("unknown membership type: {}", row.membership_type))
        })?;

        Ok(Member {
            id: row.id,
            member_code: row.member_code,
            name: row.name,
            phone: row.phone,
            membership_type,
            membership_status: row.membership_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            removed_at: row.removed_at,
        })
    }
}

fn into_member(row: Option<MemberRow>) -> Result<Option<Member>, DomainError> {
    row.map(Member::try_from).transpose()
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_code(&self, member_code: &str) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT
                id, member_code, name, phone, membership_type, membership_status,
                created_at, updated_at, removed_at
            FROM members
            WHERE member_code = $1 AND removed_at IS NULL
            "#,
        )
        .bind(member_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding member by code", e))?;

        into_member(row)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT
                id, member_code, name, phone, membership_type, membership_status,
                created_at, updated_at, removed_at
            FROM members
            WHERE phone = $1 AND removed_at IS NULL
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding member by phone", e))?;

        into_member(row)
    }

    async fn find_by_name_and_phone(&self, name: &str, phone: &str) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT
                id, member_code, name, phone, membership_type, membership_status,
                created_at, updated_at, removed_at
            FROM members
            WHERE name = $1 AND phone = $2 AND removed_at IS NULL
            "#,
        )
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding member by name and phone", e))?;

        into_member(row)
    }

    async fn list(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT
                id, member_code, name, phone, membership_type, membership_status,
                created_at, updated_at, removed_at
            FROM members
            WHERE removed_at IS NULL
              AND ($1::BOOLEAN IS NULL OR membership_status = $1)
            ORDER BY id
            "#,
        )
        .bind(filter.active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing members", e))?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn next_code_sequence(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT nextval('member_code_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("allocating member code", e))
    }

    async fn create(&self, member: &NewMember, member_code: &str) -> Result<Member, DomainError> {
        info!("Creating member {}", member_code);

        let row: MemberRow = sqlx::query_as(
            r#"
            INSERT INTO members (member_code, name, phone, membership_type)
            VALUES ($1, $2, $3, $4)
            RETURNING
                id, member_code, name, phone, membership_type, membership_status,
                created_at, updated_at, removed_at
            "#,
        )
        .bind(member_code)
        .bind(&member.name)
        .bind(&member.phone)
        .bind(member.membership_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some(MEMBER_CODE_KEY) => DomainError::MemberCodeExists(member_code.to_string()),
            Some(MEMBER_PHONE_KEY) => DomainError::PhoneAlreadyRegistered,
            _ => database_error("creating member", e),
        })?;

        row.try_into()
    }

    async fn soft_delete(&self, id: i64, removed_at: DateTime<Utc>) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET removed_at = $2, updated_at = $2
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(removed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("removing member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }

        Ok(())
    }
}
