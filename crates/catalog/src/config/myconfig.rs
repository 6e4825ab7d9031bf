use anyhow::{Context, Result, anyhow};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBackend {
    Mongo,
    Postgres,
    Memory,
}

impl CatalogBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogBackend::Mongo => "mongo",
            CatalogBackend::Postgres => "postgres",
            CatalogBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for CatalogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(CatalogBackend::Mongo),
            "postgres" | "postgresql" => Ok(CatalogBackend::Postgres),
            "memory" => Ok(CatalogBackend::Memory),
            other => Err(anyhow!(
                "CATALOG_BACKEND must be 'mongo', 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

#[derive(Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}

#[derive(Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub min_conn: u32,
    pub max_conn: u32,
    pub run_migrations: bool,
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("database_url", &"<redacted>")
            .field("min_conn", &self.min_conn)
            .field("max_conn", &self.max_conn)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend: CatalogBackend,
    pub mongo: Option<MongoConfig>,
    pub postgres: Option<PostgresConfig>,
    pub is_dev: bool,
    pub enable_file_log: bool,
    pub expose_error_detail: bool,
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let mongo_uri = lookup("MONGODB_URI").filter(|v| !v.trim().is_empty());
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let backend = match lookup("CATALOG_BACKEND") {
            Some(raw) => raw.parse::<CatalogBackend>()?,
            None if mongo_uri.is_some() => CatalogBackend::Mongo,
            None if database_url.is_some() => CatalogBackend::Postgres,
            None => CatalogBackend::Memory,
        };

        let mongo = match backend {
            CatalogBackend::Mongo => Some(MongoConfig {
                uri: mongo_uri.context("Missing environment variable: MONGODB_URI")?,
                database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "coffeehub".into()),
                collection: lookup("MONGODB_COLLECTION").unwrap_or_else(|| "products".into()),
            }),
            _ => None,
        };

        let postgres = match backend {
            CatalogBackend::Postgres => {
                let database_url =
                    database_url.context("Missing environment variable: DATABASE_URL")?;

                let min_conn = lookup("DB_MIN_CONN")
                    .unwrap_or_else(|| "1".into())
                    .parse::<u32>()
                    .context("DB_MIN_CONN must be a valid u32 integer")?;

                let max_conn = lookup("DB_MAX_CONN")
                    .unwrap_or_else(|| "5".into())
                    .parse::<u32>()
                    .context("DB_MAX_CONN must be a valid u32 integer")?;

                let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
                    None | Some("true") => true,
                    Some("false") => false,
                    Some(other) => {
                        return Err(anyhow!(
                            "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                            other
                        ));
                    }
                };

                Some(PostgresConfig {
                    database_url,
                    min_conn,
                    max_conn: max_conn.max(min_conn),
                    run_migrations,
                })
            }
            _ => None,
        };

        let is_dev = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        let is_development_env = lookup("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".into());

        Ok(Self {
            port,
            backend,
            mongo,
            postgres,
            is_dev,
            enable_file_log,
            expose_error_detail: is_dev || is_development_env,
            cors_allowed_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_backend_on_port_4000() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.backend, CatalogBackend::Memory);
        assert!(!config.expose_error_detail);
        assert_eq!(config.cors_allowed_origin, "*");
    }

    #[test]
    fn mongo_uri_selects_document_store() {
        let config = config_from(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(config.backend, CatalogBackend::Mongo);

        let mongo = config.mongo.unwrap();
        assert_eq!(mongo.database, "coffeehub");
        assert_eq!(mongo.collection, "products");
    }

    #[test]
    fn explicit_postgres_backend_requires_database_url() {
        let err = config_from(&[("CATALOG_BACKEND", "postgres")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn postgres_pool_bounds_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/coffeehub"),
            ("DB_MIN_CONN", "2"),
            ("DB_MAX_CONN", "8"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        let postgres = config.postgres.unwrap();
        assert_eq!(config.backend, CatalogBackend::Postgres);
        assert_eq!((postgres.min_conn, postgres.max_conn), (2, 8));
        assert!(!postgres.run_migrations);
    }

    #[test]
    fn development_env_exposes_error_detail() {
        let config = config_from(&[("APP_ENV", "development")]).unwrap();
        assert!(config.expose_error_detail);
    }

    #[test]
    fn rejects_unknown_backend_and_bad_port() {
        assert!(config_from(&[("CATALOG_BACKEND", "redis")]).is_err());
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn debug_output_redacts_connection_strings() {
        let config = config_from(&[("MONGODB_URI", "mongodb://user:hunter2@db")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
