// ============================================================================
// Gym Core - Member Entity
// File: crates/gym-core/src/domain/member.rs
// Description: Gym member with membership plan and status gate
// ============================================================================

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));

/// Membership plan enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Monthly,
    Quarterly,
    Yearly,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Monthly => "monthly",
            MembershipType::Quarterly => "quarterly",
            MembershipType::Yearly => "yearly",
        }
    }
}

impl FromStr for MembershipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(MembershipType::Monthly),
            "quarterly" => Ok(MembershipType::Quarterly),
            "yearly" => Ok(MembershipType::Yearly),
            other => Err(DomainError::ValidationError(format!("Unknown membership type: {}", other))),
        }
    }
}

/// Member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Storage key. Never accepted from the outside for authentication.
    pub id: i64,
    pub member_code: String,
    pub name: String,
    pub phone: String,
    pub membership_type: MembershipType,
    pub membership_status: bool,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.membership_status && !self.is_deleted()
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }

    pub fn phone_matches(&self, phone: &str) -> bool {
        self.phone == phone.trim()
    }

    pub fn summary(&self) -> MemberSummary {
        MemberSummary {
            member_code: self.member_code.clone(),
            name: self.name.clone(),
            membership_type: self.membership_type,
            membership_status: self.membership_status,
        }
    }
}

/// What public verification endpoints may reveal about a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member_code: String,
    pub name: String,
    pub membership_type: MembershipType,
    pub membership_status: bool,
}

/// Input for member registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMember {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(regex(path = *PHONE_PATTERN, message = "Phone must be 7 to 15 digits, optionally prefixed with +"))]
    pub phone: String,

    pub membership_type: MembershipType,
}

impl NewMember {
    pub fn new(
        name: String,
        phone: String,
        membership_type: MembershipType,
    ) -> Result<Self, validator::ValidationErrors> {
        let member = Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            membership_type,
        };

        member.validate()?;
        Ok(member)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub active: Option<bool>,
}

/// Render a member code from a storage-allocated sequence number,
/// e.g. `TDFC` + 7 → `TDFC007`. Numbers wider than `width` are kept whole.
pub fn format_member_code(prefix: &str, sequence: i64, width: usize) -> String {
    format!("{}{:0width$}", prefix, sequence, width = width)
}
