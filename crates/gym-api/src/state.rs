use std::sync::Arc;

use gym_core::services::{AttendanceService, AuthService, MemberService, PaymentService, ReportService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub members: Arc<MemberService>,
    pub attendance: Arc<AttendanceService>,
    pub payments: Arc<PaymentService>,
    pub reports: Arc<ReportService>,
}
