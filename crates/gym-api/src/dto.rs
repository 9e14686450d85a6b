//! Request and response bodies

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gym_core::domain::{
    Admin, Attendance, AttendanceWithMember, Member, MemberFilter, MembershipType,
    Payment, PaymentRequest,
};
use gym_shared::utils::mask_phone;

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterAdminRequest {
    pub username: String,
    pub password: String,
}

/// OAuth2 password-flow form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            username: admin.username,
            created_at: admin.created_at,
            last_login: admin.last_login,
        }
    }
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub phone: String,
    pub membership_type: MembershipType,
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberListQuery {
    pub active: Option<bool>,
}

impl From<MemberListQuery> for MemberFilter {
    fn from(query: MemberListQuery) -> Self {
        MemberFilter { active: query.active }
    }
}

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: String,
}

/// Full member record, admin-only.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub member_code: String,
    pub name: String,
    pub phone: String,
    pub membership_type: MembershipType,
    pub membership_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            member_code: member.member_code,
            name: member.name,
            phone: member.phone,
            membership_type: member.membership_type,
            membership_status: member.membership_status,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

/// Either `member_code` or `name` identifies the member; `phone` is always
/// required.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceQuery {
    pub member_code: Option<String>,
    pub name: Option<String>,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub id: i64,
    pub check_in_time: DateTime<Utc>,
    pub check_in_date: NaiveDate,
    pub check_in_local: String,
    pub check_out_time: Option<DateTime<Utc>>,
}

impl From<Attendance> for AttendanceResponse {
    fn from(attendance: Attendance) -> Self {
        Self {
            check_in_local: attendance.check_in_local(),
            id: attendance.id,
            check_in_time: attendance.check_in_time,
            check_in_date: attendance.check_in_date,
            check_out_time: attendance.check_out_time,
        }
    }
}

/// Attendance row on the public dashboards. The phone is masked.
#[derive(Debug, Serialize)]
pub struct AttendanceEntryResponse {
    pub member_code: String,
    pub member_name: String,
    pub member_phone: String,
    #[serde(flatten)]
    pub attendance: AttendanceResponse,
}

impl From<AttendanceWithMember> for AttendanceEntryResponse {
    fn from(entry: AttendanceWithMember) -> Self {
        Self {
            member_phone: mask_phone(&entry.member_phone),
            member_code: entry.member_code,
            member_name: entry.member_name,
            attendance: entry.attendance.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub member_code: String,
    pub amount: Decimal,
    #[serde(default, deserialize_with = "client_instant::optional")]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "client_instant::required")]
    pub next_due_date: DateTime<Utc>,
    pub payment_reference: String,
}

/// Client timestamps may omit the offset (taken as UTC) or be a bare date.
mod client_instant {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    use gym_core::time::parse_instant;

    fn parse<E: Error>(raw: &str) -> Result<DateTime<Utc>, E> {
        parse_instant(raw).ok_or_else(|| E::custom(format!("invalid date or datetime: {}", raw)))
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw)
    }

    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw))
            .transpose()
    }
}

impl From<CreatePaymentRequest> for PaymentRequest {
    fn from(req: CreatePaymentRequest) -> Self {
        PaymentRequest {
            member_code: req.member_code,
            amount: req.amount,
            payment_date: req.payment_date,
            next_due_date: req.next_due_date,
            payment_reference: req.payment_reference,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: i64,
    pub member_code: String,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,
    pub payment_reference: String,
}

impl PaymentResponse {
    pub fn new(payment: Payment, member_code: &str) -> Self {
        Self {
            id: payment.id,
            member_code: member_code.to_string(),
            amount: payment.amount,
            payment_date: payment.payment_date,
            next_due_date: payment.next_due_date,
            payment_reference: payment.payment_reference,
        }
    }
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
