use crate::{
    domain::{
        requests::product::CreateProductRequest,
        response::{product::ProductResponse, stats::CatalogStats},
    },
    middleware::JsonBody,
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    responses(
        (status = 200, description = "Every product in the catalog", body = Vec<ProductResponse>),
        (status = 503, description = "Store not available", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let products = state
        .di_container
        .product_query
        .find_all()
        .await
        .map_err(|e| HttpError::from_service(e, state.expose_error_detail))?;

    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid JSON or missing fields", body = ErrorResponse),
        (status = 503, description = "Store not available", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = state
        .di_container
        .product_command
        .create_product(&body)
        .await
        .map_err(|e| HttpError::from_service(e, state.expose_error_detail))?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Product",
    responses(
        (status = 200, description = "Catalog statistics", body = CatalogStats),
        (status = 503, description = "Store not available", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, HttpError> {
    let stats = state
        .di_container
        .product_query
        .get_stats()
        .await
        .map_err(|e| HttpError::from_service(e, state.expose_error_detail))?;

    Ok((StatusCode::OK, Json(stats)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(get_products).post(create_product))
        .route("/api/stats", get(get_stats))
        .with_state(app_state)
}
