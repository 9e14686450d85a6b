//! Route table and middleware stack

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use gym_shared::config::CorsSettings;

use crate::handlers::{admin, attendance, health, members, payments};
use crate::state::AppState;

pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    let member_routes = get(members::list_members).post(members::create_member);
    let payment_routes = post(payments::create_payment);

    Router::new()
        .route("/health", get(health::health_check))
        // Admin accounts
        .route("/admin/register", post(admin::register))
        .route("/admin/login", post(admin::login))
        .route("/admin/me", get(admin::me))
        // Members
        .route("/members", member_routes.clone())
        .route("/members/", member_routes)
        .route("/members/{member_code}", delete(members::remove_member))
        .route("/members/verify_by_id/{member_code}", get(members::verify_by_code))
        .route("/members/verify/{name}", get(members::verify_by_name))
        // Attendance
        .route("/attendance/mark", post(attendance::mark))
        .route("/attendance/today", get(attendance::today))
        .route("/attendance/recent", get(attendance::recent))
        .route(
            "/admin/attendance/{member_code}",
            get(attendance::member_history).post(attendance::admin_mark),
        )
        // Payments
        .route("/payments", payment_routes.clone())
        .route("/payments/", payment_routes)
        .route("/admin/payments/{member_code}", get(payments::payment_history))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(cors)),
        )
        .with_state(state)
}

fn cors_layer(cors: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}
