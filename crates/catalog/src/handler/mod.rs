mod health;
mod product;

use crate::{
    domain::{
        requests::product::CreateProductRequest,
        response::{
            health::{DatabaseHealth, DebugInfo, HealthResponse, ServiceInfo},
            product::ProductResponse,
            stats::CatalogStats,
        },
    },
    state::AppState,
};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{
    errors::{ErrorResponse, HttpError},
    utils::shutdown_signal,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::health::health_routes;
pub use self::product::product_routes;

const BODY_LIMIT: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        product::get_products,
        product::create_product,
        product::get_stats,

        health::health_handler,
        health::debug_handler,
        health::root_handler,
    ),
    components(schemas(
        ProductResponse,
        CreateProductRequest,
        CatalogStats,
        HealthResponse,
        DatabaseHealth,
        DebugInfo,
        ServiceInfo,
        ErrorResponse,
    )),
    tags(
        (name = "Product", description = "Coffee catalog endpoints"),
        (name = "Health", description = "Service and store status"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub async fn not_found_handler(method: Method, uri: Uri) -> HttpError {
    HttpError::NotFound {
        path: uri.path().to_string(),
        method: method.to_string(),
    }
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if allowed_origin == "*" {
        return cors.allow_origin(Any);
    }

    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("⚠️ Invalid CORS_ALLOWED_ORIGIN '{allowed_origin}': {e}, allowing any origin");
            cors.allow_origin(Any)
        }
    }
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(product_routes(shared_state.clone()))
            .merge(health_routes(shared_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .fallback(not_found_handler)
            .method_not_allowed_fallback(not_found_handler)
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&shared_state.cors_allowed_origin))
    }

    pub async fn serve(port: u16, app_state: Arc<AppState>) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📚 API Documentation available at:");
        info!("   📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("   📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}
