use anyhow::Context;
use mongodb::{Client, bson::doc, options::ClientOptions};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

pub type ConnectionPool = Pool<Postgres>;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        connection_string: &str,
        min_connections: u32,
        max_connections: u32,
    ) -> anyhow::Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .min_connections(min_connections)
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(connection_string)
            .await
            .map_err(|err| anyhow::anyhow!("Failed to create database connection pool: {}", err))?;

        Ok(pool)
    }

    /// Builds a document-store client and pings `database` so a bad URI or an
    /// unreachable cluster surfaces here rather than on the first request.
    pub async fn new_mongo_client(
        connection_string: &str,
        app_name: &str,
        database: &str,
    ) -> anyhow::Result<Client> {
        let mut options = ClientOptions::parse(connection_string)
            .await
            .context("Failed to parse MongoDB connection string")?;

        options.app_name = Some(app_name.to_string());
        options.server_selection_timeout = Some(Duration::from_secs(10));

        let client = Client::with_options(options).context("Failed to build MongoDB client")?;

        client
            .database(database)
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to ping MongoDB")?;

        info!("✅ MongoDB ping to '{database}' succeeded");

        Ok(client)
    }
}
