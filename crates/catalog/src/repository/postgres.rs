use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    model::product::{NewProduct, OriginCount, Product as ProductModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct PostgresCatalogStore {
    db: ConnectionPool,
}

impl PostgresCatalogStore {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for PostgresCatalogStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT
                id::TEXT AS id,
                name,
                origin,
                kind,
                price,
                roast,
                rating,
                description,
                created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(total)
    }

    async fn count_by_origin(&self) -> Result<Vec<OriginCount>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let counts = sqlx::query_as::<_, OriginCount>(
            r#"
            SELECT origin, COUNT(*) AS count
            FROM products
            WHERE origin <> ''
            GROUP BY origin
            ORDER BY MIN(id)
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to group products by origin: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(counts)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for PostgresCatalogStore {
    async fn create_product(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, origin, kind, price, roast, rating, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id::TEXT AS id,
                name,
                origin,
                kind,
                price,
                roast,
                rating,
                description,
                created_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.origin)
        .bind(&product.kind)
        .bind(product.price)
        .bind(&product.roast)
        .bind(product.rating)
        .bind(&product.description)
        .bind(product.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", result.id, result.name);
        Ok(result)
    }
}
