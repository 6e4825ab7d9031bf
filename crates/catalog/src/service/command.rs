use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, REQUIRED_FIELDS, TextInput},
        response::product::ProductResponse,
    },
    model::product::NewProduct,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info};
use validator::{Validate, ValidationErrors};

pub const DEFAULT_ROAST: &str = "Medium";
pub const DEFAULT_DESCRIPTION: &str = "Sin descripción";
pub const DEFAULT_RATING: f64 = 0.0;

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register("product_command_service", registry);

        Ok(Self { command, metrics })
    }

    fn complete(&self, start: Instant, status: StatusUtils, message: &str) {
        let elapsed = start.elapsed().as_secs_f64();

        match status {
            StatusUtils::Success => info!("✅ Operation completed successfully: {message}"),
            StatusUtils::Error => error!("❌ Operation failed: {message}"),
        }

        self.metrics.record(Method::Post, status, elapsed);
    }
}

/// Applies the catalog defaults to a request that already passed validation.
pub fn build_new_product(req: &CreateProductRequest, created_at: DateTime<Utc>) -> NewProduct {
    let text = |value: &Option<TextInput>| {
        value
            .as_ref()
            .and_then(TextInput::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let non_empty_or = |value: &Option<TextInput>, default: &str| {
        value
            .as_ref()
            .and_then(TextInput::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    NewProduct {
        name: text(&req.name),
        origin: text(&req.origin),
        kind: text(&req.kind),
        price: req.price.as_ref().and_then(|p| p.to_f64()).unwrap_or_default(),
        roast: non_empty_or(&req.roast, DEFAULT_ROAST),
        rating: req
            .rating
            .as_ref()
            .and_then(|r| r.to_f64())
            .unwrap_or(DEFAULT_RATING),
        description: non_empty_or(&req.description, DEFAULT_DESCRIPTION),
        created_at,
    }
}

/// Current time at the precision every backend can store.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn validation_failure(req: &CreateProductRequest, errors: &ValidationErrors) -> ServiceError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("invalid {}", e.code))
        })
        .collect();
    messages.sort();
    messages.dedup();

    ServiceError::Validation {
        errors: messages,
        required: REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
        received: req.received.clone(),
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!(
            "🏗️ Creating product: {:?}",
            req.name.as_ref().and_then(TextInput::as_str)
        );

        let start = Instant::now();

        if let Err(errors) = req.validate() {
            let err = validation_failure(req, &errors);
            self.complete(start, StatusUtils::Error, &err.to_string());
            return Err(err);
        }

        let new_product = build_new_product(req, now_millis());

        let product = match self.command.create_product(&new_product).await {
            Ok(product) => product,
            Err(e) => {
                let msg = format!("Failed to create product {}: {e}", new_product.name);
                self.complete(start, StatusUtils::Error, &msg);
                return Err(ServiceError::from(e));
            }
        };

        self.complete(
            start,
            StatusUtils::Success,
            &format!("Product created with ID {}", product.id),
        );

        Ok(ProductResponse::from(product))
    }
}
