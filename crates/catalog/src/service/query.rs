use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::{health::StoreHealth, product::ProductResponse, stats::CatalogStats},
};
use anyhow::Result;
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register("product_query_service", registry);

        Ok(Self { query, metrics })
    }

    fn complete(&self, start: Instant, status: StatusUtils, message: &str) {
        let elapsed = start.elapsed().as_secs_f64();

        match status {
            StatusUtils::Success => info!("✅ Operation completed successfully: {message}"),
            StatusUtils::Error => error!("❌ Operation failed: {message}"),
        }

        self.metrics.record(Method::Get, status, elapsed);
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products");

        let start = Instant::now();

        let products = match self.query.find_all().await {
            Ok(products) => products,
            Err(e) => {
                self.complete(
                    start,
                    StatusUtils::Error,
                    &format!("Failed to fetch all products: {e}"),
                );
                return Err(ServiceError::from(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        self.complete(
            start,
            StatusUtils::Success,
            &format!("Retrieved {} products", data.len()),
        );

        Ok(data)
    }

    async fn get_stats(&self) -> Result<CatalogStats, ServiceError> {
        info!("📊 Computing catalog statistics");

        let start = Instant::now();

        let products = match self.query.find_all().await {
            Ok(products) => products,
            Err(e) => {
                self.complete(
                    start,
                    StatusUtils::Error,
                    &format!("Failed to load products for stats: {e}"),
                );
                return Err(ServiceError::from(e));
            }
        };

        let origins = match self.query.count_by_origin().await {
            Ok(origins) => origins,
            Err(e) => {
                self.complete(
                    start,
                    StatusUtils::Error,
                    &format!("Failed to group products by origin: {e}"),
                );
                return Err(ServiceError::from(e));
            }
        };

        let prices: Vec<f64> = products.iter().map(|p| p.price).collect();
        let stats = CatalogStats::compute(&prices, &origins);

        self.complete(
            start,
            StatusUtils::Success,
            &format!(
                "Stats total={} avg_price={} popular_origin={}",
                stats.total, stats.avg_price, stats.popular_origin
            ),
        );

        Ok(stats)
    }

    async fn check_health(&self) -> StoreHealth {
        if let Err(e) = self.query.ping().await {
            warn!("⚠️ Store ping failed: {e}");
            return StoreHealth {
                connected: false,
                products_count: None,
                error: Some(e.to_string()),
            };
        }

        match self.query.count().await {
            Ok(count) => StoreHealth {
                connected: true,
                products_count: Some(count),
                error: None,
            },
            Err(e) => {
                warn!("⚠️ Store reachable but count failed: {e}");
                StoreHealth {
                    connected: true,
                    products_count: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
