//! Domain services (business logic)

pub mod attendance_service;
pub mod auth_service;
pub mod member_service;
pub mod payment_service;
pub mod report_service;

pub use attendance_service::AttendanceService;
pub use auth_service::{AuthService, LoginResult};
pub use member_service::{MemberCodeFormat, MemberService};
pub use payment_service::PaymentService;
pub use report_service::ReportService;
