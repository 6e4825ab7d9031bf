use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

/// A stored product as every backend hands it back.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub kind: String,
    pub price: f64,
    pub roast: String,
    pub rating: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A validated record ready for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub origin: String,
    pub kind: String,
    pub price: f64,
    pub roast: String,
    pub rating: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            origin: self.origin,
            kind: self.kind,
            price: self.price,
            roast: self.roast,
            rating: self.rating,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OriginCount {
    pub origin: String,
    pub count: i64,
}

impl OriginCount {
    /// Frequencies of the non-empty origins, ordered by first appearance.
    pub fn tally<'a, I>(origins: I) -> Vec<OriginCount>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: Vec<OriginCount> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for origin in origins.into_iter().filter(|o| !o.is_empty()) {
            match index.get(origin) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(origin, counts.len());
                    counts.push(OriginCount {
                        origin: origin.to_string(),
                        count: 1,
                    });
                }
            }
        }

        counts
    }
}

/// Shape of a product in the document store. Fields written by older
/// deployments may be missing, hence the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub roast: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "createdAt", default = "epoch")]
    pub created_at: bson::DateTime,
}

fn epoch() -> bson::DateTime {
    bson::DateTime::from_millis(0)
}

impl From<&NewProduct> for ProductDocument {
    fn from(value: &NewProduct) -> Self {
        ProductDocument {
            id: None,
            name: value.name.clone(),
            origin: value.origin.clone(),
            kind: value.kind.clone(),
            price: value.price,
            roast: value.roast.clone(),
            rating: value.rating,
            description: value.description.clone(),
            created_at: bson::DateTime::from_millis(value.created_at.timestamp_millis()),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(value: ProductDocument) -> Self {
        Product {
            id: value.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: value.name,
            origin: value.origin,
            kind: value.kind,
            price: finite_or_zero(value.price),
            roast: value.roast,
            rating: finite_or_zero(value.rating),
            description: value.description,
            created_at: DateTime::from_timestamp_millis(value.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

/// Older writers stored NaN when a decimal failed to parse.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Reads an aggregation count, which the server may encode as int32, int64
/// or double depending on magnitude.
pub fn bson_count(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}
