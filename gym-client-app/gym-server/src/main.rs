use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use gym_api::{build_router, AppState};
use gym_core::services::{
    AttendanceService, AuthService, MemberCodeFormat, MemberService, PaymentService, ReportService,
};
use gym_core::{Clock, SystemClock};
use gym_infrastructure::{
    create_pool, run_migrations, PgAdminRepository, PgAttendanceRepository, PgMemberRepository,
    PgPaymentRepository,
};
use gym_security::JwtService;
use gym_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (reads .env first)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = gym_shared::telemetry::init_telemetry(&config.telemetry)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    info!("Database connection established.");

    // Repositories and services
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let members = Arc::new(PgMemberRepository::new(pool.clone()));
    let attendance = Arc::new(PgAttendanceRepository::new(pool.clone()));
    let payments = Arc::new(PgPaymentRepository::new(pool.clone()));
    let admins = Arc::new(PgAdminRepository::new(pool));

    let jwt = JwtService::new(
        &config.jwt.secret,
        &config.jwt.algorithm,
        config.jwt.access_token_expiry_minutes,
    )?;

    let state = AppState {
        auth: Arc::new(AuthService::new(admins, Arc::new(jwt), clock.clone())),
        members: Arc::new(MemberService::new(
            members.clone(),
            clock.clone(),
            MemberCodeFormat {
                prefix: config.members.code_prefix.clone(),
                width: config.members.code_width,
            },
        )),
        attendance: Arc::new(AttendanceService::new(members.clone(), attendance.clone(), clock.clone())),
        payments: Arc::new(PaymentService::new(members.clone(), payments, clock.clone())),
        reports: Arc::new(ReportService::new(members, attendance, clock, config.members.recent_limit)),
    };

    // Seed bootstrap admin
    if let (Some(username), Some(password)) = (
        config.bootstrap.admin_username.as_deref(),
        config.bootstrap.admin_password.as_deref(),
    ) {
        if state.auth.ensure_admin(username, password).await? {
            info!("Bootstrap admin {} created", username);
        }
    } else {
        warn!("No bootstrap admin configured; register one via POST /admin/register");
    }

    let app = build_router(state, &config.cors);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
