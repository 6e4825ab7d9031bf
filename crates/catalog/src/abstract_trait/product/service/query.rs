use crate::domain::response::{
    health::StoreHealth, product::ProductResponse, stats::CatalogStats,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn get_stats(&self) -> Result<CatalogStats, ServiceError>;
    /// Never fails; an unreachable store is reported in the result.
    async fn check_health(&self) -> StoreHealth;
}
