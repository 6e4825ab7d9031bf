pub mod myconfig;

pub use self::myconfig::{CatalogBackend, Config, MongoConfig, PostgresConfig};
