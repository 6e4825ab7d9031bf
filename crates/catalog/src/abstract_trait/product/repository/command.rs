use crate::model::product::{NewProduct, Product as ProductModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Persists one product and returns it with the id the store assigned.
    async fn create_product(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError>;
}
