//! sqlx error mapping shared by the repositories

use tracing::error;

use gym_core::error::DomainError;

pub(crate) const MEMBER_CODE_KEY: &str = "members_member_code_key";
pub(crate) const MEMBER_PHONE_KEY: &str = "members_phone_live_key";
pub(crate) const ATTENDANCE_DAY_KEY: &str = "attendances_member_day_key";
pub(crate) const PAYMENT_REFERENCE_KEY: &str = "payments_payment_reference_key";
pub(crate) const ADMIN_USERNAME_KEY: &str = "admins_username_key";

/// Name of the unique constraint `e` violated, if it is a unique violation.
pub(crate) fn unique_violation(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

pub(crate) fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}
