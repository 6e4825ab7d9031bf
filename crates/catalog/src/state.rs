use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    config::{CatalogBackend, Config, MongoConfig, PostgresConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::{
        InMemoryCatalogStore, MongoCatalogStore, PostgresCatalogStore, UnavailableCatalogStore,
    },
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{ConnectionManager, ConnectionPool};
use std::{fmt, sync::Arc, time::Instant};
use tracing::{error, info};

/// Connection owned by the process, closed on shutdown.
#[derive(Clone)]
pub enum StoreHandle {
    Postgres(ConnectionPool),
    Mongo(mongodb::Client),
    Detached,
}

impl StoreHandle {
    pub async fn close(self) {
        match self {
            StoreHandle::Postgres(pool) => {
                pool.close().await;
                info!("🔌 Postgres pool closed");
            }
            StoreHandle::Mongo(client) => {
                client.shutdown().await;
                info!("🔌 MongoDB client closed");
            }
            StoreHandle::Detached => {}
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub backend: CatalogBackend,
    pub expose_error_detail: bool,
    pub cors_allowed_origin: String,
    pub started_at: Instant,
    pub store: StoreHandle,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("backend", &self.backend)
            .field("expose_error_detail", &self.expose_error_detail)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let (deps, store) = match connect_store(config).await {
            Ok(connected) => connected,
            Err(e) => {
                error!("❌ Catalog store unavailable ({}): {e:#}", config.backend);
                let fallback = Arc::new(UnavailableCatalogStore::new(format!("{e:#}")));
                (
                    DependenciesInjectDeps::from_store(fallback),
                    StoreHandle::Detached,
                )
            }
        };

        let mut state = Self::from_deps(
            config.backend,
            deps,
            config.expose_error_detail,
            config.cors_allowed_origin.clone(),
        )?;
        state.store = store;

        Ok(state)
    }

    /// Builds the state around already constructed stores.
    pub fn from_deps(
        backend: CatalogBackend,
        deps: DependenciesInjectDeps,
        expose_error_detail: bool,
        cors_allowed_origin: String,
    ) -> Result<Self> {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            di_container,
            registry: Arc::new(registry),
            backend,
            expose_error_detail,
            cors_allowed_origin,
            started_at: Instant::now(),
            store: StoreHandle::Detached,
        })
    }
}

async fn connect_store(config: &Config) -> Result<(DependenciesInjectDeps, StoreHandle)> {
    match config.backend {
        CatalogBackend::Memory => {
            info!("🗃️ Using in-memory catalog store");
            let store = Arc::new(InMemoryCatalogStore::new());
            Ok((
                DependenciesInjectDeps::from_store(store),
                StoreHandle::Detached,
            ))
        }
        CatalogBackend::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .context("Postgres backend selected without configuration")?;
            connect_postgres(pg).await
        }
        CatalogBackend::Mongo => {
            let mongo = config
                .mongo
                .as_ref()
                .context("MongoDB backend selected without configuration")?;
            connect_mongo(mongo).await
        }
    }
}

async fn connect_postgres(config: &PostgresConfig) -> Result<(DependenciesInjectDeps, StoreHandle)> {
    let pool =
        ConnectionManager::new_pool(&config.database_url, config.min_conn, config.max_conn)
            .await
            .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let store = Arc::new(PostgresCatalogStore::new(pool.clone()));
    log_product_count(&*store).await;

    Ok((
        DependenciesInjectDeps::from_store(store),
        StoreHandle::Postgres(pool),
    ))
}

async fn connect_mongo(config: &MongoConfig) -> Result<(DependenciesInjectDeps, StoreHandle)> {
    let client =
        ConnectionManager::new_mongo_client(&config.uri, "coffeehub-catalog", &config.database)
            .await
            .context("Failed to connect to MongoDB")?;

    let store = Arc::new(MongoCatalogStore::new(
        client.database(&config.database),
        &config.collection,
    ));
    log_product_count(&*store).await;

    Ok((
        DependenciesInjectDeps::from_store(store),
        StoreHandle::Mongo(client),
    ))
}

async fn log_product_count<S>(store: &S)
where
    S: ProductQueryRepositoryTrait + Sync,
{
    match store.count().await {
        Ok(count) => info!("✅ Catalog store connected, {count} products"),
        Err(e) => error!("❌ Connected but failed to count products: {e}"),
    }
}

pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
