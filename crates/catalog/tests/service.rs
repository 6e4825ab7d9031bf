use catalog::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    abstract_trait::product::service::{ProductCommandServiceTrait, ProductQueryServiceTrait},
    domain::requests::product::CreateProductRequest,
    model::product::Product,
    repository::{InMemoryCatalogStore, UnavailableCatalogStore},
    service::{ProductCommandService, ProductQueryService},
};
use chrono::{DateTime, Utc};
use prometheus_client::{encoding::text::encode, registry::Registry};
use serde_json::json;
use shared::errors::ServiceError;
use std::sync::Arc;

struct Services {
    store: Arc<InMemoryCatalogStore>,
    query: ProductQueryService,
    command: ProductCommandService,
    registry: Registry,
}

fn services_with(products: Vec<Product>) -> Services {
    let store = Arc::new(InMemoryCatalogStore::with_products(products));
    let mut registry = Registry::default();

    let query = ProductQueryService::new(store.clone(), &mut registry).unwrap();
    let command = ProductCommandService::new(store.clone(), &mut registry).unwrap();

    Services {
        store,
        query,
        command,
        registry,
    }
}

fn product(id: &str, origin: &str, price: f64) -> Product {
    Product {
        id: id.into(),
        name: format!("Coffee {id}"),
        origin: origin.into(),
        kind: "Arabica".into(),
        price,
        roast: "Medium".into(),
        rating: 0.0,
        description: "Sin descripción".into(),
        created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
    }
}

fn request(body: serde_json::Value) -> CreateProductRequest {
    CreateProductRequest::from_json(body).unwrap()
}

#[tokio::test]
async fn create_applies_defaults_and_assigns_id() {
    let svc = services_with(vec![]);

    let created = svc
        .command
        .create_product(&request(json!({
            "name": "Kona",
            "origin": "Hawaii",
            "type": "Arabica",
            "price": 65.00
        })))
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.roast, "Medium");
    assert_eq!(created.rating, 0.0);
    assert_eq!(created.description, "Sin descripción");
    assert!(created.created_at.ends_with('Z'));

    let listed = svc.query.find_all().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn successive_creates_have_distinct_ids_and_ordered_timestamps() {
    let svc = services_with(vec![]);
    let body = json!({"name": "Kona", "origin": "Hawaii", "type": "Arabica", "price": 65});

    let first = svc.command.create_product(&request(body.clone())).await.unwrap();
    let second = svc.command.create_product(&request(body)).await.unwrap();

    assert_ne!(first.id, second.id);

    let parse = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
    assert!(parse(&first.created_at) <= parse(&second.created_at));
}

#[tokio::test]
async fn invalid_create_reports_fields_and_leaves_store_untouched() {
    let svc = services_with(vec![product("1", "Peru", 10.0)]);

    let err = svc
        .command
        .create_product(&request(json!({"name": "Kona", "price": 12})))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation {
            errors,
            required,
            received,
        } => {
            assert!(errors.contains(&"origin is required".to_string()));
            assert!(errors.contains(&"type is required".to_string()));
            assert_eq!(required, vec!["name", "origin", "type", "price"]);
            assert_eq!(received, vec!["name", "price"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert_eq!(svc.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn stats_pick_the_most_frequent_origin() {
    let svc = services_with(vec![
        product("1", "Brazil", 10.0),
        product("2", "Brazil", 20.0),
        product("3", "Colombia", 30.0),
    ]);

    let stats = svc.query.get_stats().await.unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.avg_price, 20.0);
    assert_eq!(stats.popular_origin, "Brazil");
}

#[tokio::test]
async fn stats_on_empty_catalog() {
    let svc = services_with(vec![]);

    let stats = svc.query.get_stats().await.unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.avg_price, 0.0);
    assert_eq!(stats.popular_origin, "N/A");
}

#[tokio::test]
async fn stats_round_average_and_break_ties_by_first_seen() {
    let svc = services_with(vec![
        product("1", "Kenya", 10.0),
        product("2", "Ethiopia", 10.0),
        product("3", "Ethiopia", 10.01),
        product("4", "Kenya", 10.0),
    ]);

    let stats = svc.query.get_stats().await.unwrap();

    assert_eq!(stats.avg_price, 10.0);
    assert_eq!(stats.popular_origin, "Kenya");
}

#[tokio::test]
async fn list_and_stats_are_idempotent() {
    let svc = services_with(vec![product("1", "Peru", 12.5), product("2", "", 7.5)]);

    assert_eq!(
        svc.query.find_all().await.unwrap(),
        svc.query.find_all().await.unwrap()
    );
    assert_eq!(
        svc.query.get_stats().await.unwrap(),
        svc.query.get_stats().await.unwrap()
    );
}

#[tokio::test]
async fn health_reports_connected_store_with_count() {
    let svc = services_with(vec![product("1", "Peru", 12.5)]);

    let health = svc.query.check_health().await;

    assert!(health.connected);
    assert_eq!(health.products_count, Some(1));
    assert!(health.error.is_none());
}

#[tokio::test]
async fn unavailable_store_fails_every_operation_as_unavailable() {
    let store = Arc::new(UnavailableCatalogStore::new("connection refused"));
    let mut registry = Registry::default();
    let query = ProductQueryService::new(store.clone(), &mut registry).unwrap();
    let command = ProductCommandService::new(store, &mut registry).unwrap();

    assert!(matches!(
        query.find_all().await,
        Err(ServiceError::Unavailable(_))
    ));
    assert!(matches!(
        query.get_stats().await,
        Err(ServiceError::Unavailable(_))
    ));

    let created = command
        .create_product(&request(json!({
            "name": "Kona", "origin": "Hawaii", "type": "Arabica", "price": 65
        })))
        .await;
    assert!(matches!(created, Err(ServiceError::Unavailable(_))));

    let health = query.check_health().await;
    assert!(!health.connected);
    assert!(health.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn operations_are_counted_in_the_registry() {
    let svc = services_with(vec![]);
    svc.query.find_all().await.unwrap();

    let mut buffer = String::new();
    encode(&mut buffer, &svc.registry).unwrap();

    assert!(buffer.contains("product_query_service_request_counter"));
    assert!(buffer.contains("product_command_service_request_duration"));
}
