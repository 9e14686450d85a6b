//! Application-wide constants

pub const DEFAULT_MEMBER_CODE_PREFIX: &str = "TDFC";
pub const DEFAULT_MEMBER_CODE_WIDTH: usize = 3;
pub const DEFAULT_RECENT_ATTENDANCE_LIMIT: i64 = 10;
pub const MAX_RECENT_ATTENDANCE_LIMIT: i64 = 100;
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const TOKEN_TYPE_BEARER: &str = "bearer";
