// ============================================================================
// Gym Infrastructure - PostgreSQL Admin Repository
// File: crates/gym-infrastructure/src/database/postgres/admin_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use gym_core::domain::{Admin, NewAdmin};
use gym_core::error::DomainError;
use gym_core::repositories::AdminRepository;

use super::errors::{database_error, unique_violation, ADMIN_USERNAME_KEY};

pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AdminRow {
    pub id: i64,
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            username: row.username,
            hashed_password: row.hashed_password,
            created_at: row.created_at,
            last_login: row.last_login,
        }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, username, hashed_password, created_at, last_login
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding admin by username", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, admin: &NewAdmin) -> Result<Admin, DomainError> {
        info!("Creating admin {}", admin.username);

        let row: AdminRow = sqlx::query_as(
            r#"
            INSERT INTO admins (username, hashed_password, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, username, hashed_password, created_at, last_login
            "#,
        )
        .bind(&admin.username)
        .bind(&admin.hashed_password)
        .bind(admin.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            Some(ADMIN_USERNAME_KEY) => DomainError::UsernameAlreadyExists(admin.username.clone()),
            _ => database_error("creating admin", e),
        })?;

        Ok(row.into())
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE admins SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("recording admin login", e))?;

        Ok(())
    }
}
