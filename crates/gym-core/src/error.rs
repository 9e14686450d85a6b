//! Domain errors

use thiserror::Error;

/// Coarse classification used by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Unauthorized,
    Validation,
    Internal,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Member not found")]
    MemberNotFound,

    #[error("Membership is inactive")]
    MembershipInactive,

    #[error("Phone number already registered")]
    PhoneAlreadyRegistered,

    #[error("Attendance already marked for today at {check_in}")]
    AttendanceAlreadyMarked { check_in: String },

    /// Raised by storage when the (member, local date) constraint rejects
    /// an insert.
    #[error("Attendance already recorded for this member and day")]
    DuplicateAttendance,

    #[error("Payment reference already exists: {0}")]
    PaymentReferenceExists(String),

    #[error("Username already registered: {0}")]
    UsernameAlreadyExists(String),

    #[error("Member code already allocated: {0}")]
    MemberCodeExists(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::MemberNotFound => ErrorKind::NotFound,
            DomainError::MembershipInactive => ErrorKind::Forbidden,
            DomainError::PhoneAlreadyRegistered
            | DomainError::AttendanceAlreadyMarked { .. }
            | DomainError::DuplicateAttendance
            | DomainError::PaymentReferenceExists(_)
            | DomainError::UsernameAlreadyExists(_)
            | DomainError::MemberCodeExists(_) => ErrorKind::Conflict,
            DomainError::InvalidCredentials | DomainError::InvalidToken => ErrorKind::Unauthorized,
            DomainError::ValidationError(_) => ErrorKind::Validation,
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
