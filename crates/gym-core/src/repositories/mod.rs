//! Repository traits (ports)

pub mod member_repository;
pub mod attendance_repository;
pub mod payment_repository;
pub mod admin_repository;

pub use member_repository::MemberRepository;
pub use attendance_repository::AttendanceRepository;
pub use payment_repository::PaymentRepository;
pub use admin_repository::AdminRepository;

#[cfg(any(test, feature = "mocks"))]
pub use member_repository::MockMemberRepository;
#[cfg(any(test, feature = "mocks"))]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(any(test, feature = "mocks"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "mocks"))]
pub use admin_repository::MockAdminRepository;
