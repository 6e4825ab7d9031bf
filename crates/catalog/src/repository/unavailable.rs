use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    model::product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;

/// Installed when the configured store could not be reached at startup, so
/// the server still comes up and can report the failure through health.
pub struct UnavailableCatalogStore {
    reason: String,
}

impl UnavailableCatalogStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> RepositoryError {
        RepositoryError::Unavailable(format!("Database not initialized: {}", self.reason))
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for UnavailableCatalogStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Err(self.error())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(self.error())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for UnavailableCatalogStore {
    async fn create_product(&self, _product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        Err(self.error())
    }
}
