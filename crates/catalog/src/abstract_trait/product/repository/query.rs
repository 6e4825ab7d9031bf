use crate::model::product::{OriginCount, Product as ProductModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Every product, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError>;

    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Frequency of each non-empty origin, ordered by first appearance.
    async fn count_by_origin(&self) -> Result<Vec<OriginCount>, RepositoryError> {
        let products = self.find_all().await?;
        Ok(OriginCount::tally(products.iter().map(|p| p.origin.as_str())))
    }

    async fn ping(&self) -> Result<(), RepositoryError>;
}
