//! Admin domain entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Serialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

// The hash stays out of logs.
impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("hashed_password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .finish()
    }
}

/// An admin about to be written
#[derive(Clone)]
pub struct NewAdmin {
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_hash() {
        let admin = Admin {
            id: 1,
            username: "owner".to_string(),
            hashed_password: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
            last_login: None,
        };
        let debug = format!("{:?}", admin);
        assert!(debug.contains("owner"));
        assert!(!debug.contains("argon2id"));
    }
}
