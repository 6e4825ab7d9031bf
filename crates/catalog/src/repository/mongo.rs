use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    model::product::{
        NewProduct, OriginCount, Product as ProductModel, ProductDocument, bson_count,
    },
};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};
use shared::errors::RepositoryError;
use tracing::{error, info};

#[derive(Clone)]
pub struct MongoCatalogStore {
    database: Database,
    products: Collection<ProductDocument>,
}

impl MongoCatalogStore {
    pub fn new(database: Database, collection: &str) -> Self {
        let products = database.collection::<ProductDocument>(collection);
        Self { database, products }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MongoCatalogStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all product documents");

        let cursor = self.products.find(doc! {}).await.map_err(|e| {
            error!("❌ Failed to query products: {:?}", e);
            RepositoryError::from(e)
        })?;

        let documents: Vec<ProductDocument> = cursor.try_collect().await.map_err(|e| {
            error!("❌ Failed to read product cursor: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(documents.into_iter().map(ProductModel::from).collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let total = self.products.count_documents(doc! {}).await.map_err(|e| {
            error!("❌ Failed to count products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(total as i64)
    }

    async fn count_by_origin(&self) -> Result<Vec<OriginCount>, RepositoryError> {
        let pipeline = vec![
            doc! { "$match": { "origin": { "$type": "string", "$ne": "" } } },
            doc! {
                "$group": {
                    "_id": "$origin",
                    "count": { "$sum": 1 },
                    "firstSeen": { "$min": "$_id" },
                }
            },
            doc! { "$sort": { "firstSeen": 1 } },
        ];

        let cursor = self.products.aggregate(pipeline).await.map_err(|e| {
            error!("❌ Failed to aggregate origins: {:?}", e);
            RepositoryError::from(e)
        })?;

        let groups: Vec<mongodb::bson::Document> =
            cursor.try_collect().await.map_err(RepositoryError::from)?;

        let counts = groups
            .iter()
            .filter_map(|group| {
                let origin = group.get_str("_id").ok()?;
                Some(OriginCount {
                    origin: origin.to_string(),
                    count: bson_count(group.get("count")),
                })
            })
            .collect();

        Ok(counts)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MongoCatalogStore {
    async fn create_product(&self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let document = ProductDocument::from(product);

        let result = self.products.insert_one(&document).await.map_err(|err| {
            error!("❌ Failed to insert product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| {
                RepositoryError::Custom(format!(
                    "Unexpected inserted id type: {}",
                    result.inserted_id
                ))
            })?;

        info!("✅ Created product ID {} ({})", id, product.name);
        Ok(product.clone().into_product(id))
    }
}
