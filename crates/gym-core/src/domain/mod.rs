//! # Gym Core - Domain Module
//! 
//! Domain entities for the gym membership service.

pub mod member;
pub mod attendance;
pub mod payment;
pub mod admin;

// Re-export all entities and enums
pub use member::{format_member_code, Member, MemberFilter, MemberSummary, MembershipType, NewMember};
pub use attendance::{Attendance, AttendanceWithMember, NewAttendance};
pub use payment::{NewPayment, Payment, PaymentRequest};
pub use admin::{Admin, NewAdmin};
