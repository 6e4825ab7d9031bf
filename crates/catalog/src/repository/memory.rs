use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    model::product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    products: RwLock<Vec<ProductModel>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<ProductModel>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryCatalogStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.products.read().await.len() as i64)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryCatalogStore {
    async fn create_product(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let created = product.clone().into_product(Uuid::new_v4().to_string());

        self.products.write().await.push(created.clone());

        info!("✅ Stored product {} ({}) in memory", created.id, created.name);
        Ok(created)
    }
}
