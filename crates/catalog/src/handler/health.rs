use crate::{
    domain::response::health::{DatabaseHealth, DebugInfo, HealthResponse, ServiceInfo},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

pub const ENDPOINTS: [&str; 7] = [
    "GET /api/products",
    "POST /api/products",
    "GET /api/stats",
    "GET /api/health",
    "GET /api/debug",
    "GET /metrics",
    "GET /swagger-ui",
];

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.di_container.product_query.check_health().await;

    let (code, status) = if store.connected {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status.into(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime_seconds: uptime_seconds(&state),
        database_connected: store.connected,
        database: DatabaseHealth {
            backend: state.backend.to_string(),
            products_count: store.products_count,
            error: store.error,
        },
    };

    (code, Json(body))
}

#[utoipa::path(
    get,
    path = "/api/debug",
    tag = "Health",
    responses((status = 200, description = "Runtime and store diagnostics", body = DebugInfo))
)]
pub async fn debug_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.di_container.product_query.check_health().await;

    Json(DebugInfo {
        backend: state.backend.to_string(),
        version: env!("CARGO_PKG_VERSION").into(),
        platform: std::env::consts::OS.into(),
        expose_error_detail: state.expose_error_detail,
        database_connected: store.connected,
        connection_error: store.error,
        products_count: store.products_count,
        uptime_seconds: uptime_seconds(&state),
    })
}

fn uptime_seconds(state: &AppState) -> f64 {
    let uptime = state.started_at.elapsed().as_secs_f64();
    (uptime * 1000.0).round() / 1000.0
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service banner", body = ServiceInfo))
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(ServiceInfo {
        message: "CoffeeHub Backend API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

pub fn health_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(root_handler))
        .route("/api/health", get(health_handler))
        .route("/api/debug", get(debug_handler))
        .with_state(app_state)
}
