//! PostgreSQL repository implementations

mod errors;

pub mod member_repo_impl;
pub mod attendance_repo_impl;
pub mod payment_repo_impl;
pub mod admin_repo_impl;

pub use member_repo_impl::PgMemberRepository;
pub use attendance_repo_impl::PgAttendanceRepository;
pub use payment_repo_impl::PgPaymentRepository;
pub use admin_repo_impl::PgAdminRepository;
