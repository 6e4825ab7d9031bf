use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What the store reported when probed.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreHealth {
    pub connected: bool,
    pub products_count: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    #[schema(example = "mongo")]
    pub backend: String,
    pub products_count: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: String,
    pub uptime_seconds: f64,
    pub database_connected: bool,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ServiceInfo {
    #[schema(example = "CoffeeHub Backend API")]
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Runtime facts for troubleshooting. Connection strings are never included.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    #[schema(example = "mongo")]
    pub backend: String,
    pub version: String,
    #[schema(example = "linux")]
    pub platform: String,
    pub expose_error_detail: bool,
    pub database_connected: bool,
    pub connection_error: Option<String>,
    pub products_count: Option<i64>,
    pub uptime_seconds: f64,
}
