use crate::{
    abstract_trait::product::{
        repository::{
            DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
            ProductQueryRepositoryTrait,
        },
        service::{DynProductCommandService, DynProductQueryService},
    },
    service::{ProductCommandService, ProductQueryService},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub query_repo: DynProductQueryRepository,
    pub command_repo: DynProductCommandRepository,
}

impl DependenciesInjectDeps {
    /// Uses one store for both sides.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ProductQueryRepositoryTrait + ProductCommandRepositoryTrait + Send + Sync + 'static,
    {
        Self {
            query_repo: store.clone(),
            command_repo: store,
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            query_repo,
            command_repo,
        } = deps;

        let product_query = ProductQueryService::new(query_repo, registry)
            .context("failed initialize product query")?;

        let product_command = ProductCommandService::new(command_repo, registry)
            .context("failed initialize product command")?;

        Ok(Self {
            product_query: Arc::new(product_query),
            product_command: Arc::new(product_command),
        })
    }
}
