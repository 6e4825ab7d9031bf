use crate::model::product::{Product as ProductModel, finite_or_zero};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "665f1c2e9b1e8a3f4c2d1a0b")]
    pub id: String,
    pub name: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub roast: String,
    pub rating: f64,
    pub description: String,
    #[schema(example = "2025-01-01T12:00:00.000Z")]
    pub created_at: String,
}

// model to response
impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            origin: value.origin,
            kind: value.kind,
            price: finite_or_zero(value.price),
            roast: value.roast,
            rating: finite_or_zero(value.rating),
            description: value.description,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn renders_type_and_millisecond_timestamp() {
        let model = ProductModel {
            id: "7".into(),
            name: "Kona".into(),
            origin: "Hawaii".into(),
            kind: "Arabica".into(),
            price: f64::NAN,
            roast: "Medium".into(),
            rating: 4.5,
            description: "Sin descripción".into(),
            created_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };

        let json = serde_json::to_value(ProductResponse::from(model)).unwrap();

        assert_eq!(json["type"], "Arabica");
        assert_eq!(json["price"], 0.0);
        assert_eq!(json["rating"], 4.5);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");
    }
}
